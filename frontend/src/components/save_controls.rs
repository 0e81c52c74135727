use common::gate::SaveGate;
use common::{GlueError, Result};
use web_sys::{Document, Element};

use crate::dom;

/// Submit controls captured when the page is initialised.
pub struct SaveControls {
    controls: Vec<Element>,
}

impl SaveControls {
    pub fn by_selector(document: &Document, selector: &str) -> Result<Self> {
        let controls: Vec<Element> = dom::query_all(document, selector);
        if controls.is_empty() {
            return Err(GlueError::MissingElement(selector.to_string()));
        }
        Ok(Self { controls })
    }

    pub fn by_id(document: &Document, id: &str) -> Result<Self> {
        Ok(Self {
            controls: vec![dom::element_by_id(document, id)?],
        })
    }
}

impl SaveGate for SaveControls {
    fn disable_all(&self) {
        for control in &self.controls {
            control.set_attribute("disabled", "").ok();
        }
    }

    fn enable_all(&self) {
        for control in &self.controls {
            control.remove_attribute("disabled").ok();
        }
    }
}
