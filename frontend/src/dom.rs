//! Small wrappers over `web-sys` shared by the page components.

use common::api::UserPrompt;
use common::config::GlueConfig;
use common::cookie::CsrfToken;
use common::{GlueError, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlDocument, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| GlueError::MissingElement("window".to_string()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| GlueError::MissingElement("document".to_string()))
}

/// Looks up `#id` and casts it to the expected element type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| GlueError::MissingElement(id.to_string()))
}

/// All elements under `root` matching `selector`, cast to `T`; others are skipped.
pub fn query_all<T: JsCast>(root: &impl AsRef<JsValue>, selector: &str) -> Vec<T> {
    let list = match root.as_ref().dyn_ref::<Element>() {
        Some(element) => element.query_selector_all(selector),
        None => match root.as_ref().dyn_ref::<Document>() {
            Some(document) => document.query_selector_all(selector),
            None => return Vec::new(),
        },
    };
    let Ok(list) = list else {
        log::warn!("invalid selector {:?}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn csrf_token(config: &GlueConfig) -> CsrfToken {
    let cookies = document()
        .ok()
        .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
        .and_then(|document| document.cookie().ok())
        .unwrap_or_default();
    CsrfToken::from_cookies(&cookies, &config.csrf.cookie)
}

/// Runs `f` once the DOM is parsed, immediately if it already is.
pub fn on_ready(f: impl FnOnce() + 'static) {
    let Ok(document) = document() else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        log::error!("could not wait for DOMContentLoaded: {}", js_error(&e));
    }
}

/// Attaches `handler` for the lifetime of the page.
pub fn on_event(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| GlueError::Transport(js_error(&e)))?;
    closure.forget();
    Ok(())
}

pub fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `window.alert` / `window.prompt`.
#[derive(Clone, Copy, Default)]
pub struct BrowserDialogs;

impl UserPrompt for BrowserDialogs {
    fn alert(&self, message: &str) {
        if let Ok(window) = window() {
            window.alert_with_message(message).ok();
        }
    }

    fn prompt(&self, message: &str) -> Option<String> {
        window()
            .ok()
            .and_then(|window| window.prompt_with_message(message).ok().flatten())
    }
}
