//! Runtime configuration for the page glue.
//!
//! Every field has a default matching the routes and element ids the admin
//! templates ship with, so an empty JSON object (`{}`) is a complete config.
//! The browser crate layers page-provided overrides on top of these defaults.

use serde::Deserialize;

use crate::error::{GlueError, Result};

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GlueConfig {
    pub endpoints: Endpoints,
    pub csrf: CsrfConfig,
    pub elements: ElementIds,
    /// Utils script handed to the international phone widget.
    pub phone_widget_utils: String,
    pub image: ImageConfig,
    /// Lowers the console log level to `Debug`.
    pub debug: bool,
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            csrf: CsrfConfig::default(),
            elements: ElementIds::default(),
            phone_widget_utils:
                "https://cdnjs.cloudflare.com/ajax/libs/intl-tel-input/19.0.2/js/utils.js"
                    .to_string(),
            image: ImageConfig::default(),
            debug: false,
        }
    }
}

impl GlueConfig {
    /// Parses a JSON document, filling every missing field with its default.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GlueError::Config(e.to_string()))
    }

    /// Layers page-provided settings over the defaults.
    ///
    /// `embedded` is the JSON config document, if the page has one; a
    /// malformed document is logged and ignored. `global` looks up the
    /// endpoint variables older pages define, which win over both.
    pub fn resolve(embedded: Option<&str>, global: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match embedded {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("ignoring embedded config: {}", e);
                Self::default()
            }),
            None => Self::default(),
        };

        let endpoints = &mut config.endpoints;
        let globals = [
            ("checkPhoneNumberUniqueURL", &mut endpoints.check_unique),
            ("twilioVerificationRequestURL", &mut endpoints.request_code),
            ("twilioVerificationCheckURL", &mut endpoints.check_code),
        ];
        for (name, slot) in globals {
            if let Some(url) = global(name) {
                *slot = url;
            }
        }
        config
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    pub check_unique: String,
    pub request_code: String,
    pub check_code: String,
    /// Queried as `<managers>?employer=<id>`.
    pub managers: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            check_unique: "/check_phone_number_unique/".to_string(),
            request_code: "/request-verification/".to_string(),
            check_code: "/check-verification/".to_string(),
            managers: "/fetch_managers/".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CsrfConfig {
    pub cookie: String,
    pub header: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie: "csrftoken".to_string(),
            header: "X-CSRFToken".to_string(),
        }
    }
}

/// DOM ids (without `#`) and selectors the glue binds to.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElementIds {
    pub phone_input: String,
    pub verify_button: String,
    pub register_button: String,
    /// Hidden field receiving the international number on the register page.
    pub phone_hidden: String,
    /// Hidden field receiving the international number on the admin add-user page.
    pub admin_phone_hidden: String,
    /// Visible field filled and made read-only once the admin check passes.
    pub admin_phone_visible: String,
    pub employer_select: String,
    pub manager_select: String,
    /// `name` attribute shared by the tab radio inputs.
    pub tab_input_name: String,
    pub form_container: String,
    pub submit_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            phone_input: "phone".to_string(),
            verify_button: "verify-button".to_string(),
            register_button: "register_button".to_string(),
            phone_hidden: "phone-number".to_string(),
            admin_phone_hidden: "phone_number".to_string(),
            admin_phone_visible: "id_phone_number".to_string(),
            employer_select: "id_employer".to_string(),
            manager_select: "id_manager_dropdown".to_string(),
            tab_input_name: "tab".to_string(),
            form_container: "form-container".to_string(),
            submit_selector: "input[type='submit']".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Widest output, in pixels. Narrower images are never upscaled.
    pub max_width: u32,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            quality: 90,
        }
    }
}
