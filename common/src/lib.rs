//! Target-independent half of the admin form glue.
//!
//! Everything that decides *what* happens on the admin pages lives here:
//! wire schemas for the AJAX endpoints, the phone verification state machine,
//! the save gate contract, tab and manager dropdown loading, and the image
//! downscaler. The browser crate (`admin_glue`) only implements the small
//! traits declared in [`api`], [`gate`], [`model::phone`], [`tabs`] and
//! [`managers`] against the live DOM.

pub mod api;
pub mod config;
pub mod cookie;
pub mod downscale;
pub mod error;
pub mod gate;
pub mod managers;
pub mod model;
pub mod requests;
pub mod responses;
pub mod sequence;
pub mod tabs;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GlueError, Result};
