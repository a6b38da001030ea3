//! Stream aggregation for Gemini's line-delimited response
//!
//! The backend streams one JSON object per line. The aggregator buffers the
//! whole body before parsing anything, then picks the last line that carries
//! a non-empty `candidates` list; later chunks are assumed to supersede
//! earlier ones.

use crate::gemini::types::GenerateContentResponse;
use crate::{Error, Result};
use bytes::Bytes;
use futures::{Stream, TryStreamExt};

/// Drain the backend byte stream and select the authoritative chunk.
pub async fn aggregate<S>(stream: S) -> Result<GenerateContentResponse>
where
    S: Stream<Item = Result<Bytes>>,
{
    let buffer = stream
        .try_fold(Vec::new(), |mut acc, chunk| async move {
            acc.extend_from_slice(&chunk);
            Ok(acc)
        })
        .await?;

    let body = String::from_utf8_lossy(&buffer);
    select_final_chunk(&body)
}

/// Split the accumulated body on line boundaries and return the last
/// candidate-bearing chunk.
///
/// Blank lines are discarded and unparseable lines are skipped. Zero
/// non-blank lines is `EmptyStream`; no candidate-bearing line is
/// `InvalidStream`.
pub fn select_final_chunk(body: &str) -> Result<GenerateContentResponse> {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(Error::EmptyStream);
    }

    for line in lines.iter().rev() {
        match serde_json::from_str::<GenerateContentResponse>(line) {
            Ok(chunk) if !chunk.candidates.is_empty() => return Ok(chunk),
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("Skipping unparseable stream line: {}", e);
                continue;
            }
        }
    }

    Err(Error::InvalidStream)
}
