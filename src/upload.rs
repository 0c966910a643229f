//! Decode boundary for uploaded artwork.
//!
//! Files arrive as raw bytes plus whatever MIME type and file name the host
//! knows. Raster formats decode through the `image` crate; SVG uploads are
//! rasterized with resvg at a bounded size. A failed decode leaves the
//! element without a bitmap; the user may retry.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use thiserror::Error;

/// Largest dimension an SVG upload is rasterized at.
const SVG_RASTER_SIZE: f32 = 512.0;

/// Errors surfaced when an uploaded file cannot become a bitmap.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file is not an image type this tool accepts.
    #[error("unsupported upload type: {0}")]
    UnsupportedType(String),
    /// The bytes failed to decode.
    #[error("failed to decode uploaded image: {0}")]
    Decode(String),
}

/// True when the MIME type (or, failing that, the file extension) names a
/// supported image format.
pub fn is_supported_upload(mime: &str, file_name: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    match extension(file_name).as_deref() {
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg") => true,
        _ => false,
    }
}

/// Decodes uploaded bytes into an RGBA bitmap.
pub fn decode_upload(bytes: &[u8], mime: &str, file_name: &str) -> Result<RgbaImage, UploadError> {
    if !is_supported_upload(mime, file_name) {
        log::warn!("rejected upload {file_name:?}: type {mime:?} is not an image");
        return Err(UploadError::UnsupportedType(if mime.is_empty() {
            file_name.to_string()
        } else {
            mime.to_string()
        }));
    }

    let is_svg = mime == "image/svg+xml" || extension(file_name).as_deref() == Some("svg");
    let bitmap = if is_svg {
        decode_svg(bytes)?
    } else {
        image::load_from_memory(bytes)
            .map_err(|e| {
                log::warn!("upload {file_name:?} failed to decode: {e}");
                UploadError::Decode(e.to_string())
            })?
            .to_rgba8()
    };
    log::debug!(
        "decoded upload {file_name:?}: {}x{}",
        bitmap.width(),
        bitmap.height()
    );
    Ok(bitmap)
}

fn extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Rasterizes an SVG upload, preserving aspect ratio within
/// [`SVG_RASTER_SIZE`] pixels.
fn decode_svg(bytes: &[u8]) -> Result<RgbaImage, UploadError> {
    let text = std::str::from_utf8(bytes).map_err(|e| UploadError::Decode(e.to_string()))?;
    let tree =
        Tree::from_str(text, &Options::default()).map_err(|e| UploadError::Decode(e.to_string()))?;

    let svg_size = tree.size();
    let scale = SVG_RASTER_SIZE / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| UploadError::Decode("svg has no drawable area".to_string()))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap (premultiplied alpha) to an RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = pixmap.pixel(x, y) {
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
