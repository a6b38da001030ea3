use super::types::GenerateContentRequest;
use super::{ByteStream, GenerationBackend};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::{Arc, Mutex};

/// Test backend that replays canned response bodies instead of calling
/// Gemini.
pub struct MockGenerationBackend {
    bodies: Arc<Mutex<Vec<String>>>,
    error_status: Arc<Mutex<Option<(u16, String)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            bodies: Arc::new(Mutex::new(Vec::new())),
            error_status: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a raw response body; bodies are replayed round-robin.
    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.bodies.lock().unwrap().push(body.into());
        self
    }

    /// Make every call fail with a transport error.
    pub fn with_error_status(self, status: u16, body: impl Into<String>) -> Self {
        *self.error_status.lock().unwrap() = Some((status, body.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn stream_generate(&self, _request: &GenerateContentRequest) -> Result<ByteStream> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if let Some((status, body)) = self.error_status.lock().unwrap().clone() {
            return Err(Error::VendorTransport { status, body });
        }

        let bodies = self.bodies.lock().unwrap();
        let body = if bodies.is_empty() {
            // Default: a single candidate chunk with one inline image.
            concat!(
                "{\"candidates\":[{\"content\":{\"parts\":",
                "[{\"inlineData\":{\"mimeType\":\"image/png\",\"data\":\"bW9jaw==\"}}]}}]}\n"
            )
            .to_string()
        } else {
            let index = (*count - 1) % bodies.len();
            bodies[index].clone()
        };

        // Deliver the body in two chunks so aggregation over multi-chunk
        // streams gets exercised.
        let mid = body.len() / 2;
        let chunks = vec![
            Ok(Bytes::copy_from_slice(&body.as_bytes()[..mid])),
            Ok(Bytes::copy_from_slice(&body.as_bytes()[mid..])),
        ];
        Ok(futures::stream::iter(chunks).boxed())
    }
}
