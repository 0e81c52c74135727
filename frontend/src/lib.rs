//! Browser glue for the server-rendered admin pages.
//!
//! The module is loaded once per page; each template then calls the entry
//! points it needs. Every entry point waits for the DOM, resolves the page
//! configuration and reports setup problems to the console instead of
//! throwing.

use std::rc::Rc;

use common::config::GlueConfig;
use wasm_bindgen::prelude::*;

mod components;
mod config;
mod dom;
mod http;
mod logger;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(false);
}

fn run_when_ready(
    name: &'static str,
    init: impl FnOnce(Rc<GlueConfig>) -> common::Result<()> + 'static,
) {
    dom::on_ready(move || {
        let config = config::current();
        logger::init(config.debug);
        if let Err(e) = init(config) {
            gloo_console::error!(format!("{}: {}", name, e));
        }
    });
}

/// Register page: SMS verification of the phone number.
#[wasm_bindgen(js_name = initSmsVerification)]
pub fn init_sms_verification() {
    run_when_ready("initSmsVerification", components::verification::init_sms_verification);
}

/// Admin add-user page: validity and uniqueness check.
#[wasm_bindgen(js_name = initializePhoneNumberVerification)]
pub fn init_admin_phone_check() {
    run_when_ready(
        "initializePhoneNumberVerification",
        components::verification::init_admin_phone_check,
    );
}

#[wasm_bindgen(js_name = initTabs)]
pub fn init_tabs() {
    run_when_ready("initTabs", components::tabs::init_tabs);
}

#[wasm_bindgen(js_name = initializeManagerDropdown)]
pub fn init_manager_dropdown() {
    run_when_ready("initializeManagerDropdown", |config| {
        components::managers::bind_manager_dropdown(&config)
    });
}

/// Camel-case alias of [`resize_image`].
#[wasm_bindgen(js_name = resizeImage)]
pub fn resize_image_camel(file: web_sys::File) -> js_sys::Promise {
    resize_image(file)
}

/// Resolves to a copy of `file` no wider than the configured maximum;
/// rejects with a message when the file cannot be read or decoded.
#[wasm_bindgen(js_name = pica_resize)]
pub fn resize_image(file: web_sys::File) -> js_sys::Promise {
    let image_config = config::current().image;
    wasm_bindgen_futures::future_to_promise(async move {
        components::image_upload::resize_file(file, image_config)
            .await
            .map(JsValue::from)
    })
}
