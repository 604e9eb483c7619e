//! Transport abstraction and HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use tracing::debug;

use crate::error::TransportError;

/// Header carrying the detached signature of the submission.
pub const SIGNATURE_HEADER: &str = "Signature";

/// One outbound submission: where to send it and what to send.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Target endpoint
    pub endpoint: Url,
    /// Value for the signature header
    pub signature: String,
    /// Encoded JSON document body
    pub body: Vec<u8>,
}

/// Outcome of a completed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitStatus {
    /// HTTP status code returned by the remote service
    pub code: u16,
}

impl SubmitStatus {
    /// Whether the remote service accepted the submission.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Performs the actual network call for a submission.
///
/// Implementations complete exactly once per submission, with either a status
/// or a [`TransportError`], on a task of their own choosing.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit the request and await its completion.
    async fn submit(&self, request: SubmitRequest) -> Result<SubmitStatus, TransportError>;
}

/// HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create an HTTP transport with the given per-request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, request: SubmitRequest) -> Result<SubmitStatus, TransportError> {
        debug!(
            endpoint = %request.endpoint,
            body_len = request.body.len(),
            "Posting document"
        );

        let response = self
            .client
            .post(request.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, request.signature)
            .body(request.body)
            .send()
            .await?;

        Ok(SubmitStatus {
            code: response.status().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_status_success_range() {
        assert!(SubmitStatus { code: 200 }.is_success());
        assert!(SubmitStatus { code: 201 }.is_success());
        assert!(!SubmitStatus { code: 199 }.is_success());
        assert!(!SubmitStatus { code: 429 }.is_success());
        assert!(!SubmitStatus { code: 500 }.is_success());
    }

    #[test]
    fn test_http_transport_creation() {
        let _transport = HttpTransport::new(Duration::from_secs(30)).unwrap();
    }
}
