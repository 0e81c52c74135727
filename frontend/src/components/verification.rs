//! Verify-button wiring for the register page (SMS code) and the admin
//! add-user page (uniqueness only).

use std::rc::Rc;

use common::api::UserPrompt;
use common::config::GlueConfig;
use common::gate::SaveGate;
use common::verification::{LegacyPhoneCheck, VerificationFailure, VerificationFlow};
use common::Result;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement};

use super::phone_field::{IntlPhoneField, LockStyle};
use super::save_controls::SaveControls;
use crate::dom::{self, BrowserDialogs};
use crate::http::HttpVerificationApi;

/// Register page: closes the register button until the number is verified
/// by SMS code.
pub fn init_sms_verification(config: Rc<GlueConfig>) -> Result<()> {
    let document = dom::document()?;
    let ids = &config.elements;

    let gate = SaveControls::by_id(&document, &ids.register_button)?;
    gate.disable_all();

    let input: HtmlInputElement = dom::element_by_id(&document, &ids.phone_input)?;
    let hidden = dom::element_by_id::<HtmlInputElement>(&document, &ids.phone_hidden).ok();
    let button: HtmlElement = dom::element_by_id(&document, &ids.verify_button)?;

    let lock = LockStyle::Disable;
    let field = match IntlPhoneField::attach(input, &config.phone_widget_utils, hidden, lock) {
        Ok(field) => field,
        Err(e) => return Err(widget_unavailable(e)),
    };

    let flow = Rc::new(VerificationFlow::new(
        HttpVerificationApi::new(&config),
        field,
        gate,
        BrowserDialogs,
    ));

    dom::on_event(&button, "click", move |event| {
        event.prevent_default();
        log::info!("Verify button clicked!");
        let flow = flow.clone();
        let csrf = dom::csrf_token(&config);
        spawn_local(async move {
            let state = flow.verify(&csrf).await;
            log::debug!("verification ended in {:?}", state);
        });
    })
}

/// Admin add-user page: every submit button stays disabled until the
/// number is valid and unused.
pub fn init_admin_phone_check(config: Rc<GlueConfig>) -> Result<()> {
    let document = dom::document()?;
    let ids = &config.elements;

    let gate = SaveControls::by_selector(&document, &ids.submit_selector)?;
    gate.disable_all();

    let input: HtmlInputElement = dom::element_by_id(&document, &ids.phone_input)?;
    let hidden = dom::element_by_id::<HtmlInputElement>(&document, &ids.admin_phone_hidden).ok();
    let visible: HtmlInputElement = dom::element_by_id(&document, &ids.admin_phone_visible)?;
    let button: HtmlElement = dom::element_by_id(&document, &ids.verify_button)?;

    let lock = LockStyle::MirrorReadOnly(visible);
    let field = match IntlPhoneField::attach(input, &config.phone_widget_utils, hidden, lock) {
        Ok(field) => field,
        Err(e) => return Err(widget_unavailable(e)),
    };

    let check = Rc::new(LegacyPhoneCheck::new(
        HttpVerificationApi::new(&config),
        field,
        gate,
        BrowserDialogs,
    ));

    dom::on_event(&button, "click", move |event| {
        event.prevent_default();
        let check = check.clone();
        let csrf = dom::csrf_token(&config);
        spawn_local(async move {
            if let Err(failure) = check.check(&csrf).await {
                log::info!("phone check failed: {:?}", failure);
            }
        });
    })
}

// The save gate is already closed at this point.
fn widget_unavailable(e: common::GlueError) -> common::GlueError {
    log::error!("{}", e);
    BrowserDialogs.alert(&VerificationFailure::Unavailable.to_string());
    e
}
