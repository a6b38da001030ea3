use crate::gemini::types::{GenerateContentResponse, Part};
use crate::models::{ImageData, ImagesResponse};
use chrono::Utc;

/// Extract the generated image from the selected response chunk and wrap it
/// in the OpenAI-style images envelope.
///
/// Walks `candidates[0].content.parts` and takes the first inline-data
/// part's base64 payload. Any missing level, and a parts list without inline
/// data, produce an empty `b64_json` rather than an error. `created` is
/// stamped at translation time with second granularity.
pub fn translate_response(response: &GenerateContentResponse) -> ImagesResponse {
    let b64_json = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| {
            content.parts.iter().find_map(|part| match part {
                Part::InlineData { inline_data } => Some(inline_data.data.clone()),
                _ => None,
            })
        })
        .unwrap_or_default();

    if b64_json.is_empty() {
        tracing::warn!("Selected response chunk carried no inline image data");
    }

    ImagesResponse {
        created: Utc::now().timestamp(),
        data: vec![ImageData { b64_json }],
    }
}
