//! Resolves the page configuration once per page load.
//!
//! Order: built-in defaults, then the JSON in
//! `<script type="application/json" id="admin-glue-config">`, then the
//! endpoint globals older templates still define on `window`.

use std::cell::OnceCell;
use std::rc::Rc;

use common::config::GlueConfig;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::dom;

const CONFIG_ELEMENT_ID: &str = "admin-glue-config";

thread_local! {
    static CONFIG: OnceCell<Rc<GlueConfig>> = const { OnceCell::new() };
}

pub fn current() -> Rc<GlueConfig> {
    CONFIG.with(|cell| cell.get_or_init(|| Rc::new(load())).clone())
}

fn load() -> GlueConfig {
    let embedded = dom::document()
        .ok()
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    let window = dom::window().ok();
    GlueConfig::resolve(embedded.as_deref(), |name| {
        let window = window.as_ref()?;
        Reflect::get(window, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_string())
    })
}
