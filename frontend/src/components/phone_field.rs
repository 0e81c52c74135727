//! Binding to the `intlTelInput` widget loaded by the page.

use common::model::phone::PhoneField;
use common::{GlueError, Result};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlInputElement;

use crate::dom;

/// What accepting the number does to the form.
pub enum LockStyle {
    /// Disables the widget input itself (register page).
    Disable,
    /// Copies the number into a visible field and makes it read-only
    /// (admin add-user page).
    MirrorReadOnly(HtmlInputElement),
}

pub struct IntlPhoneField {
    input: HtmlInputElement,
    widget: JsValue,
    hidden: Option<HtmlInputElement>,
    lock: LockStyle,
}

impl IntlPhoneField {
    /// Initialises the widget on `input`.
    ///
    /// Fails with [`GlueError::WidgetUnavailable`] when the library is not
    /// on the page or refuses to initialise.
    pub fn attach(
        input: HtmlInputElement,
        utils_script: &str,
        hidden: Option<HtmlInputElement>,
        lock: LockStyle,
    ) -> Result<Self> {
        let window = dom::window()?;
        let factory = Reflect::get(&window, &JsValue::from_str("intlTelInput"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| GlueError::WidgetUnavailable("intlTelInput is not loaded".to_string()))?;

        let options = Object::new();
        Reflect::set(
            &options,
            &JsValue::from_str("utilsScript"),
            &JsValue::from_str(utils_script),
        )
        .map_err(|e| GlueError::WidgetUnavailable(dom::js_error(&e)))?;

        let widget = factory
            .call2(&JsValue::NULL, &input, &options)
            .map_err(|e| GlueError::WidgetUnavailable(dom::js_error(&e)))?;

        Ok(Self {
            input,
            widget,
            hidden,
            lock,
        })
    }

    fn call(&self, method: &str) -> Option<JsValue> {
        let function = Reflect::get(&self.widget, &JsValue::from_str(method))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        match function.call0(&self.widget) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("intlTelInput.{} failed: {}", method, dom::js_error(&e));
                None
            }
        }
    }
}

impl PhoneField for IntlPhoneField {
    fn raw(&self) -> String {
        self.input.value()
    }

    fn number(&self) -> String {
        self.call("getNumber")
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }

    // `null` until the utils script has loaded.
    fn is_valid_number(&self) -> bool {
        self.call("isValidNumber")
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn publish(&self, number: &str) {
        if let Some(hidden) = &self.hidden {
            hidden.set_value(number);
        }
    }

    fn lock(&self) {
        match &self.lock {
            LockStyle::Disable => self.input.set_disabled(true),
            LockStyle::MirrorReadOnly(visible) => {
                visible.set_value(&self.number());
                visible.set_read_only(true);
            }
        }
    }
}
