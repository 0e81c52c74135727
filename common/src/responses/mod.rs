//! Response schemas of the AJAX endpoints.
//!
//! Bodies are decoded here, at the boundary, so a response missing a
//! required field surfaces as [`GlueError::Schema`] instead of being read
//! as `false` further down.

use serde::Deserialize;

use crate::error::{GlueError, Result};
use crate::model::manager::Manager;

/// `POST` uniqueness check: `{"exists": bool}`.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniquenessResponse {
    pub exists: bool,
}

/// `POST` code request and code check: `{"success": bool, "error"?: string}`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

pub fn parse_uniqueness(body: &str) -> Result<UniquenessResponse> {
    serde_json::from_str(body).map_err(GlueError::from)
}

pub fn parse_success(body: &str) -> Result<SuccessResponse> {
    serde_json::from_str(body).map_err(GlueError::from)
}

/// `GET` managers-by-employer: a JSON array, kept in server order.
pub fn parse_managers(body: &str) -> Result<Vec<Manager>> {
    serde_json::from_str(body).map_err(GlueError::from)
}
