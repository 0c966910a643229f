//! Raster export and the downstream submission payload.
//!
//! The rendered surface is encoded as PNG or JPEG for download, and the
//! session state is packaged into a camelCase JSON payload for the
//! collaborator layer, with uploaded artwork inlined as PNG data URLs.

use std::collections::BTreeMap;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;
use crate::session::EditorSession;
use crate::template::{CustomizationSchema, ElementKind, Template};

/// Fixed encoder quality for lossy output.
const JPEG_QUALITY: u8 = 90;

// ============================================================================
// Formats and errors
// ============================================================================

/// Output encodings for the rendered mockup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    /// Picks the format matching a file extension; PNG when unrecognized.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ExportFormat::Jpeg,
            _ => ExportFormat::Png,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes the rendered surface into the requested format.
///
/// JPEG output is flattened to RGB; transparency is lost there by nature of
/// the format.
pub fn encode(image: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => {
            image.write_to(&mut bytes, image::ImageFormat::Png)?;
        }
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
            encoder.encode_image(&rgb)?;
        }
    }
    let bytes = bytes.into_inner();
    log::debug!(
        "encoded {}x{} surface as {} ({} bytes)",
        image.width(),
        image.height(),
        format.mime(),
        bytes.len()
    );
    Ok(bytes)
}

/// Encodes the surface and wraps it in a `data:` URL for browser handoff.
pub fn encode_data_url(image: &RgbaImage, format: ExportFormat) -> Result<String, ExportError> {
    let bytes = encode(image, format)?;
    Ok(format!("data:{};base64,{}", format.mime(), base64(&bytes)))
}

/// Download filename for a template: whitespace collapsed to hyphens,
/// lower-cased, plus the format extension.
pub fn export_file_name(template_name: &str, format: ExportFormat) -> String {
    let slug = template_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let slug = if slug.is_empty() { "mockup".to_string() } else { slug };
    format!("{}.{}", slug, format.extension())
}

// ============================================================================
// Submission payload
// ============================================================================

/// The record handed to the collaborator layer on submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct SubmissionPayload {
    pub template_id: String,
    pub customizations: BTreeMap<String, String>,
    pub uploaded_images: BTreeMap<String, SubmittedImage>,
    #[serde(default)]
    pub notes: String,
}

/// One uploaded artwork entry in the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct SubmittedImage {
    pub raster_data_url: String,
    pub position: Point,
}

/// Packages the session for submission. Uploaded bitmaps are inlined as PNG
/// data URLs at their effective (possibly dragged) positions.
pub fn build_submission(
    template: &Template,
    schema: &CustomizationSchema,
    session: &EditorSession,
    notes: &str,
) -> Result<SubmissionPayload, ExportError> {
    let mut uploaded_images = BTreeMap::new();
    for (element_id, upload) in session.uploads() {
        // Skip uploads that no longer map to a live image element.
        let Some(element) = schema.element(element_id) else {
            continue;
        };
        if element.element_type != ElementKind::Image || element.is_reserved() {
            continue;
        }
        let position = upload
            .position_override
            .unwrap_or(element.constraints.position);
        uploaded_images.insert(
            element_id.clone(),
            SubmittedImage {
                raster_data_url: encode_data_url(&upload.bitmap, ExportFormat::Png)?,
                position,
            },
        );
    }

    Ok(SubmissionPayload {
        template_id: template.id.clone(),
        customizations: session.customizations().clone(),
        uploaded_images,
        notes: notes.to_string(),
    })
}

// ============================================================================
// Base64
// ============================================================================

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard base64 with padding, as expected inside a data URL.
fn base64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(BASE64_ALPHABET[(triple >> 18) as usize & 0x3f] as char);
        out.push(BASE64_ALPHABET[(triple >> 12) as usize & 0x3f] as char);
        out.push(if chunk.len() > 1 {
            BASE64_ALPHABET[(triple >> 6) as usize & 0x3f] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            BASE64_ALPHABET[triple as usize & 0x3f] as char
        } else {
            '='
        });
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
