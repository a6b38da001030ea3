//! Chat message translation into Gemini contents
//!
//! Turns one message's content into Gemini parts (decoding inline data URLs)
//! and an ordered message list into the `contents` array, with role mapping
//! and message filtering.

use crate::gemini::types::{Content, InlineData, Part};
use crate::models::{ChatMessage, ChatMessageContent, ContentItem};

/// Decode a `data:<mime>;base64,<payload>` URL into its MIME type and raw
/// base64 payload. Anything not matching that form yields `None`.
fn parse_data_url(url: &str) -> Option<(String, String)> {
    let rest = url.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    Some((mime_type.to_string(), payload.to_string()))
}

/// Translate one message's content into Gemini parts, preserving input
/// order.
///
/// Plain-string content always becomes exactly one text part, even when the
/// string is empty. In multipart content, text items with empty text,
/// image_url items without a data-URL payload, and unknown item types are
/// all dropped silently.
pub fn translate_content(content: &ChatMessageContent) -> Vec<Part> {
    match content {
        ChatMessageContent::Text(text) => vec![Part::Text { text: text.clone() }],
        ChatMessageContent::Parts(items) => items.iter().filter_map(translate_item).collect(),
    }
}

fn translate_item(item: &ContentItem) -> Option<Part> {
    match item {
        ContentItem::Text { text } if !text.is_empty() => Some(Part::Text { text: text.clone() }),
        ContentItem::ImageUrl { image_url } => {
            let Some((mime_type, data)) = parse_data_url(&image_url.url) else {
                tracing::debug!("Dropping image_url item without an inline data URL");
                return None;
            };
            Some(Part::InlineData {
                inline_data: InlineData { mime_type, data },
            })
        }
        _ => None,
    }
}

/// Map an ordered message list into Gemini `contents`.
///
/// Role-less and `system` messages are dropped entirely, `assistant` maps to
/// `model` and every other retained role to `user`, and messages whose
/// translated parts come out empty are omitted. Relative order of retained
/// messages is preserved.
pub fn build_contents(messages: &[ChatMessage]) -> Vec<Content> {
    messages
        .iter()
        .filter_map(|message| {
            if message.role.is_empty() || message.role == "system" {
                return None;
            }

            let parts = message
                .content
                .as_ref()
                .map(translate_content)
                .unwrap_or_default();
            if parts.is_empty() {
                return None;
            }

            let role = if message.role == "assistant" {
                "model"
            } else {
                "user"
            };

            Some(Content {
                role: Some(role.to_string()),
                parts,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(role: &str, text: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: Some(ChatMessageContent::Text(text.to_string())),
        }
    }

    #[test]
    fn test_plain_string_yields_single_text_part() {
        let parts = translate_content(&ChatMessageContent::Text("hello".to_string()));
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], Part::Text { ref text } if text == "hello"));
    }

    #[test]
    fn test_empty_string_still_yields_text_part() {
        let parts = translate_content(&ChatMessageContent::Text(String::new()));
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], Part::Text { ref text } if text.is_empty()));
    }

    #[test]
    fn test_data_url_becomes_inline_data() {
        let items = vec![ContentItem::ImageUrl {
            image_url: crate::models::ImageUrl {
                url: "data:image/png;base64,AAA".to_string(),
            },
        }];
        let parts = translate_content(&ChatMessageContent::Parts(items));
        assert_eq!(parts.len(), 1);
        let Part::InlineData { ref inline_data } = parts[0] else {
            panic!("expected inline data part");
        };
        assert_eq!(inline_data.mime_type, "image/png");
        assert_eq!(inline_data.data, "AAA");
    }

    #[test]
    fn test_non_data_url_is_dropped() {
        let items = vec![
            ContentItem::ImageUrl {
                image_url: crate::models::ImageUrl {
                    url: "https://example.com/cat.png".to_string(),
                },
            },
            ContentItem::ImageUrl {
                image_url: crate::models::ImageUrl {
                    url: "data:image/png,no-base64-marker".to_string(),
                },
            },
        ];
        let parts = translate_content(&ChatMessageContent::Parts(items));
        assert!(parts.is_empty());
    }

    #[test]
    fn test_empty_text_item_and_unknown_item_are_skipped() {
        let items = vec![
            ContentItem::Text {
                text: String::new(),
            },
            ContentItem::Unknown,
            ContentItem::Text {
                text: "kept".to_string(),
            },
        ];
        let parts = translate_content(&ChatMessageContent::Parts(items));
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], Part::Text { ref text } if text == "kept"));
    }

    #[test]
    fn test_multipart_order_is_preserved() {
        let items = vec![
            ContentItem::Text {
                text: "before".to_string(),
            },
            ContentItem::ImageUrl {
                image_url: crate::models::ImageUrl {
                    url: "data:image/jpeg;base64,QkJC".to_string(),
                },
            },
            ContentItem::Text {
                text: "after".to_string(),
            },
        ];
        let parts = translate_content(&ChatMessageContent::Parts(items));
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], Part::Text { ref text } if text == "before"));
        assert!(matches!(parts[1], Part::InlineData { .. }));
        assert!(matches!(parts[2], Part::Text { ref text } if text == "after"));
    }

    #[test]
    fn test_system_messages_never_reach_contents() {
        let messages = vec![
            text_message("system", "you are a painter"),
            text_message("user", "draw a cat"),
        ];
        let contents = build_contents(&messages);
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].role.as_deref(), Some("user"));
    }

    #[test]
    fn test_roleless_message_is_skipped() {
        let messages = vec![text_message("", "ignored"), text_message("user", "kept")];
        let contents = build_contents(&messages);
        assert_eq!(contents.len(), 1);
    }

    #[test]
    fn test_assistant_maps_to_model_and_others_to_user() {
        let messages = vec![
            text_message("assistant", "previous image"),
            text_message("tool", "some output"),
        ];
        let contents = build_contents(&messages);
        assert_eq!(contents[0].role.as_deref(), Some("model"));
        assert_eq!(contents[1].role.as_deref(), Some("user"));
    }

    #[test]
    fn test_message_with_empty_parts_is_dropped() {
        let messages = vec![
            ChatMessage {
                role: "user".to_string(),
                content: Some(ChatMessageContent::Parts(vec![ContentItem::ImageUrl {
                    image_url: crate::models::ImageUrl {
                        url: "https://example.com/not-inline.png".to_string(),
                    },
                }])),
            },
            ChatMessage {
                role: "user".to_string(),
                content: None,
            },
            text_message("user", "kept"),
        ];
        let contents = build_contents(&messages);
        assert_eq!(contents.len(), 1);
        assert!(matches!(contents[0].parts[0], Part::Text { ref text } if text == "kept"));
    }

    #[test]
    fn test_relative_order_of_retained_messages() {
        let messages = vec![
            text_message("user", "first"),
            text_message("system", "dropped"),
            text_message("assistant", "second"),
            text_message("user", "third"),
        ];
        let contents = build_contents(&messages);
        let texts: Vec<&str> = contents
            .iter()
            .map(|c| match &c.parts[0] {
                Part::Text { text } => text.as_str(),
                _ => panic!("expected text part"),
            })
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
