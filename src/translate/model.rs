use crate::gemini::types::ImageSize;
use crate::{Error, Result};

/// Base model identifier accepted from external callers. Suffixes after the
/// base only select the output resolution.
pub const MODEL_BASE: &str = "gemini-3-pro-image-preview";

/// Resolve an external model id into an output resolution.
///
/// The id must start with [`MODEL_BASE`] (case-insensitive). A `4k` token
/// anywhere after the base selects 4K; everything else, including the bare
/// base id, selects 2K.
pub fn select_resolution(model: &str) -> Result<ImageSize> {
    if model.is_empty() {
        return Err(Error::validation("model is required"));
    }

    let lower = model.to_ascii_lowercase();
    let Some(suffix) = lower.strip_prefix(MODEL_BASE) else {
        return Err(Error::validation("unsupported model"));
    };

    if suffix.contains("4k") {
        Ok(ImageSize::FourK)
    } else {
        Ok(ImageSize::TwoK)
    }
}
