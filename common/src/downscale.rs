//! Shrinking images before upload.
//!
//! Wide photos are scaled down to `max_width` with their aspect ratio kept;
//! narrower ones keep their size. Either way the result is re-encoded in the
//! declared format, JPEG at the configured quality.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use log::debug;

use crate::config::ImageConfig;
use crate::error::Result;

/// Re-encoded image ready to replace the original upload.
#[derive(Clone, Debug)]
pub struct Downscaled {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// MIME type of `bytes`; the declared type whenever it was recognised.
    pub mime: String,
}

/// `min(max_width / width, 1)`: never upscales.
pub fn scale_factor(width: u32, max_width: u32) -> f64 {
    if width == 0 {
        return 1.0;
    }
    (f64::from(max_width) / f64::from(width)).min(1.0)
}

/// Output size for a `width` x `height` source, at least one pixel each way.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    let scale = scale_factor(width, max_width);
    if scale >= 1.0 {
        return (width, height);
    }
    let new_w = (f64::from(width) * scale).round().max(1.0) as u32;
    let new_h = (f64::from(height) * scale).round().max(1.0) as u32;
    (new_w.min(max_width.max(1)), new_h)
}

/// Decodes `bytes`, scales to fit `config.max_width` and encodes as `declared_mime`.
///
/// Fails when the source cannot be decoded or the format has no encoder;
/// callers fall back to uploading the original file.
pub fn downscale(bytes: &[u8], declared_mime: &str, config: &ImageConfig) -> Result<Downscaled> {
    let source = image::load_from_memory(bytes)?;
    let (orig_w, orig_h) = source.dimensions();

    let format = match ImageFormat::from_mime_type(declared_mime) {
        Some(format) => format,
        None => image::guess_format(bytes)?,
    };

    let (width, height) = target_dimensions(orig_w, orig_h, config.max_width);
    let resized: DynamicImage = if (width, height) == (orig_w, orig_h) {
        source
    } else {
        source.resize_exact(width, height, FilterType::Lanczos3)
    };
    debug!(
        "downscaled {}x{} -> {}x{} as {:?}",
        orig_w, orig_h, width, height, format
    );

    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, config.quality))?;
        }
        other => resized.write_to(&mut out, other)?,
    }

    let mime = if ImageFormat::from_mime_type(declared_mime).is_some() {
        declared_mime.to_string()
    } else {
        format.to_mime_type().to_string()
    };

    Ok(Downscaled {
        bytes: out.into_inner(),
        width,
        height,
        mime,
    })
}
