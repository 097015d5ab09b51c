use futures::{Stream, StreamExt};
use reqwest::Client as HttpClient;
use std::pin::Pin;
use std::time::Duration;

use dossier_core::{BackendConfig, Error, Result};

use crate::classify::classify_line;
use crate::decode::LineDecoder;
use crate::types::{ArchiveQuery, StreamEvent};

/// A finite stream of response events, tied to one request
pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Backend seam for the archive chat endpoint.
///
/// The HTTP client implements this; tests substitute a scripted mock.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Issue one query and stream back classified response events.
    async fn stream_query(&self, query: ArchiveQuery) -> Result<EventStream>;
}

/// HTTP client for the archive question-answering service
pub struct ArchiveClient {
    client: HttpClient,
    url: String,
}

impl ArchiveClient {
    pub fn new(url: impl Into<String>, timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Backend(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url: url.into() })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(config.url.clone(), config.timeout_secs)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query the legacy non-streaming endpoint revision: the whole body
    /// is one JSON-encoded string. Surrounding quotes are stripped and
    /// escaped newlines unescaped.
    pub async fn ask(&self, query: &ArchiveQuery) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(query)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!("archive returned {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Backend(format!("failed to read response body: {}", e)))?;

        Ok(clean_legacy_body(&body))
    }
}

/// Strip one leading and one trailing `"` (independently, matching the
/// original client) and unescape `\n` sequences.
pub fn clean_legacy_body(body: &str) -> String {
    let body = body.strip_prefix('"').unwrap_or(body);
    let body = body.strip_suffix('"').unwrap_or(body);
    body.replace("\\n", "\n")
}

#[async_trait::async_trait]
impl Backend for ArchiveClient {
    async fn stream_query(&self, query: ArchiveQuery) -> Result<EventStream> {
        let request = self.client.post(&self.url).json(&query);

        let stream = async_stream::stream! {
            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    yield StreamEvent::TransportError(format!("request failed: {}", e));
                    return;
                }
            };

            if !response.status().is_success() {
                yield StreamEvent::TransportError(format!("archive returned {}", response.status()));
                return;
            }

            let bytes = response.bytes_stream();
            tokio::pin!(bytes);

            let mut decoder = LineDecoder::new();

            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(chunk) => {
                        for line in decoder.push(&chunk) {
                            if let Some(event) = classify_line(&line) {
                                yield StreamEvent::Line(event);
                            }
                        }
                    }
                    Err(e) => {
                        yield StreamEvent::TransportError(format!("stream error: {}", e));
                        return;
                    }
                }
            }

            // final line without a terminating newline is flushed, not lost
            if let Some(tail) = decoder.finish()
                && let Some(event) = classify_line(&tail)
            {
                yield StreamEvent::Line(event);
            }

            yield StreamEvent::Done;
        };

        Ok(Box::pin(stream))
    }
}
