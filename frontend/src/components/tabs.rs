//! Tab radios swapping server-rendered sub-forms into the form container.

use std::rc::Rc;

use common::config::GlueConfig;
use common::tabs::{FragmentTarget, TabLoader};
use common::Result;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use super::managers;
use crate::dom;
use crate::http::HttpFragmentSource;

const FORM_URL_ATTRIBUTE: &str = "data-form-url";

struct FormContainer {
    element: Element,
    config: Rc<GlueConfig>,
}

impl FragmentTarget for FormContainer {
    fn replace_content(&self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn reinitialize(&self) {
        init_dropdown_toggles(&self.element);

        let ids = &self.config.elements;
        let has_employer = self
            .element
            .query_selector(&format!("#{}", ids.employer_select))
            .ok()
            .flatten()
            .is_some();
        if has_employer {
            if let Err(e) = managers::bind_manager_dropdown(&self.config) {
                log::warn!("manager dropdown not rebound: {}", e);
            }
        }
    }
}

/// Recreates Bootstrap dropdown instances for toggles inside `root`, when
/// Bootstrap is on the page.
fn init_dropdown_toggles(root: &Element) {
    let Ok(window) = dom::window() else {
        return;
    };
    let factory = Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .and_then(|bootstrap| Reflect::get(&bootstrap, &JsValue::from_str("Dropdown")))
        .ok()
        .filter(|dropdown| !dropdown.is_undefined());
    let Some(dropdown) = factory else {
        return;
    };
    let Some(get_or_create) = Reflect::get(&dropdown, &JsValue::from_str("getOrCreateInstance"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return;
    };

    let toggles: Vec<Element> = dom::query_all(root, "[data-bs-toggle='dropdown']");
    for toggle in &toggles {
        if let Err(e) = get_or_create.call1(&dropdown, toggle) {
            log::warn!("dropdown toggle not initialised: {}", dom::js_error(&e));
        }
    }
}

fn form_url(tab: &HtmlInputElement) -> Option<String> {
    tab.get_attribute(FORM_URL_ATTRIBUTE)
        .filter(|url| !url.is_empty())
}

fn spawn_load(loader: &Rc<TabLoader<HttpFragmentSource, FormContainer>>, url: String) {
    let loader = loader.clone();
    spawn_local(async move {
        // Failures are logged by the loader; the container keeps its content.
        let _ = loader.load(&url).await;
    });
}

/// Checks the first tab, loads its form, and reloads on every change.
pub fn init_tabs(config: Rc<GlueConfig>) -> Result<()> {
    let document = dom::document()?;
    let ids = &config.elements;
    let container: Element = dom::element_by_id(&document, &ids.form_container)?;
    let tabs: Vec<HtmlInputElement> =
        dom::query_all(&document, &format!("input[name='{}']", ids.tab_input_name));

    let loader = Rc::new(TabLoader::new(
        HttpFragmentSource,
        FormContainer {
            element: container,
            config: config.clone(),
        },
    ));

    for tab in &tabs {
        let loader = loader.clone();
        let source = tab.clone();
        dom::on_event(tab, "change", move |_| match form_url(&source) {
            Some(url) => spawn_load(&loader, url),
            None => log::warn!("tab {} has no {}", source.id(), FORM_URL_ATTRIBUTE),
        })?;
    }

    if let Some(first) = tabs.first() {
        first.set_checked(true);
        if let Some(url) = form_url(first) {
            spawn_load(&loader, url);
        }
    }
    Ok(())
}
