use super::context::build_contents;
use crate::gemini::types::{
    GenerateContentRequest, GenerationConfig, ImageConfig, ImageSize,
};
use crate::models::ChatCompletionRequest;

/// Assemble the Gemini request from translated contents and the fixed
/// generation configuration.
pub fn build_generate_request(
    request: &ChatCompletionRequest,
    image_size: ImageSize,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: build_contents(&request.messages),
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            image_config: ImageConfig { image_size },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMessage, ChatMessageContent};
    use crate::translate::select_resolution;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_end_to_end_request_shape() {
        let request = ChatCompletionRequest {
            model: "gemini-3-pro-image-preview-4k".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(ChatMessageContent::Text("draw a cat".to_string())),
            }],
        };

        let size = select_resolution(&request.model).unwrap();
        let vendor_request = build_generate_request(&request, size);

        let json = serde_json::to_value(&vendor_request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "draw a cat"}]}
                ],
                "generationConfig": {
                    "responseModalities": ["TEXT", "IMAGE"],
                    "imageConfig": {"imageSize": "4K"}
                }
            })
        );
    }

    #[test]
    fn test_generation_config_is_fixed_regardless_of_messages() {
        let request = ChatCompletionRequest {
            model: "gemini-3-pro-image-preview".to_string(),
            messages: vec![],
        };

        let vendor_request = build_generate_request(&request, ImageSize::TwoK);
        assert!(vendor_request.contents.is_empty());
        assert_eq!(
            vendor_request.generation_config.response_modalities,
            vec!["TEXT".to_string(), "IMAGE".to_string()]
        );
        assert_eq!(
            vendor_request.generation_config.image_config.image_size,
            ImageSize::TwoK
        );
    }
}
