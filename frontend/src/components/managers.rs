//! Employer select driving the manager select.

use std::rc::Rc;

use common::config::GlueConfig;
use common::managers::{ManagerDropdown, OptionList};
use common::model::manager::SelectOption;
use common::Result;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::dom;
use crate::http::HttpManagerDirectory;

struct SelectList(HtmlSelectElement);

impl OptionList for SelectList {
    fn replace_options(&self, options: &[SelectOption]) {
        self.0.set_length(0);
        for option in options {
            let added = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)
                .and_then(|element| self.0.add_with_html_option_element(&element));
            if let Err(e) = added {
                log::warn!("could not add option {:?}: {}", option.label, dom::js_error(&e));
            }
        }
    }
}

/// Binds the dropdown pair currently in the document and resets the
/// manager list to its placeholder.
pub fn bind_manager_dropdown(config: &GlueConfig) -> Result<()> {
    let document = dom::document()?;
    let ids = &config.elements;
    let employer: HtmlSelectElement = dom::element_by_id(&document, &ids.employer_select)?;
    let manager: HtmlSelectElement = dom::element_by_id(&document, &ids.manager_select)?;

    let dropdown = Rc::new(ManagerDropdown::new(
        HttpManagerDirectory::new(config),
        SelectList(manager),
    ));
    dropdown.reset();

    let source = employer.clone();
    dom::on_event(&employer, "change", move |_| {
        let dropdown = dropdown.clone();
        let employer_id = source.value();
        spawn_local(async move {
            // Errors are logged by the dropdown and leave the placeholder.
            let _ = dropdown.sync(&employer_id).await;
        });
    })
}
