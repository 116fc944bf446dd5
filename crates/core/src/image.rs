//! Image payload helpers.
//!
//! Images are stored as raw `BYTEA` next to their MIME type. JSON responses
//! carry them as standard base64 text; only the dedicated image route serves
//! the raw bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serializer;

/// MIME type used when an upload or a stored row does not declare one.
pub const DEFAULT_MIMETYPE: &str = "application/octet-stream";

/// Resolve the `Content-Type` to serve for a stored image.
pub fn content_type_or_default(mimetype: Option<&str>) -> &str {
    match mimetype {
        Some(m) if !m.trim().is_empty() => m,
        _ => DEFAULT_MIMETYPE,
    }
}

/// Encode image bytes as standard (padded) base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Serde helper: serialize `Option<Vec<u8>>` as base64 text or `null`.
///
/// Use with `#[serde(serialize_with = "storefront_core::image::serialize_base64_opt")]`.
pub fn serialize_base64_opt<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(bytes) => serializer.serialize_str(&encode_base64(bytes)),
        None => serializer.serialize_none(),
    }
}
