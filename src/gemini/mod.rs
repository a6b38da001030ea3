//! Gemini backend integration: wire types, the HTTP transport, and the
//! trait seam the request pipeline calls through.

pub mod client;
pub mod mock;
pub mod types;

pub use client::GeminiClient;
pub use mock::MockGenerationBackend;

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use types::GenerateContentRequest;

/// Raw body stream of a `streamGenerateContent` call.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Perform the backend call and hand back the raw response byte stream.
    ///
    /// A non-success upstream status is reported as
    /// [`Error::VendorTransport`](crate::Error::VendorTransport) before any
    /// stream is returned.
    async fn stream_generate(&self, request: &GenerateContentRequest) -> Result<ByteStream>;
}
