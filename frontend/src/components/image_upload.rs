//! Browser side of the image downscaler: `File` in, smaller `File` out.

use common::config::ImageConfig;
use common::downscale::downscale;
use gloo_file::futures::read_as_bytes;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use web_sys::{File, FilePropertyBag};

/// Reads, downscales and re-wraps `file` under its original name.
///
/// The error is a message suitable for rejecting a JS promise; callers fall
/// back to the original file.
pub async fn resize_file(file: File, config: ImageConfig) -> Result<File, JsValue> {
    let name = file.name();
    let declared_type = file.type_();

    let bytes = read_as_bytes(&gloo_file::File::from(file))
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to read file {}: {}", name, e)))?;

    let resized = downscale(&bytes, &declared_type, &config)
        .map_err(|e| JsValue::from_str(&format!("Failed to load image {}: {}", name, e)))?;
    log::debug!(
        "{}: {} bytes -> {} bytes ({}x{})",
        name,
        bytes.len(),
        resized.bytes.len(),
        resized.width,
        resized.height
    );

    let parts = Array::of1(&Uint8Array::from(resized.bytes.as_slice()));
    let options = FilePropertyBag::new();
    options.set_type(&resized.mime);
    File::new_with_u8_array_sequence_and_options(&parts, &name, &options)
}
