//! DOM-side components. Each one implements a seam from `common` against
//! the live page and wires it to the matching element events.

pub mod image_upload;
pub mod managers;
pub mod phone_field;
pub mod save_controls;
pub mod tabs;
pub mod verification;
