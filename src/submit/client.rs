//! Submission orchestration.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{QuotagateError, Result, TransportError};
use crate::ratelimit::{WindowLimiter, WindowTicker};

use super::document::Document;
use super::encoder::{DocumentEncoder, JsonEncoder};
use super::transport::{HttpTransport, SubmitRequest, SubmitStatus, Transport};

/// Rate-limited client for a document-registration endpoint.
///
/// Each client owns its limiter and window ticker; there is no process-wide
/// shared state. Submissions acquire a slot (waiting if the window is
/// exhausted), encode the document, and hand the request to the transport.
/// The slot is returned exactly once per submission, whether it ends in a
/// response, a transport failure, or an encoding failure before the send.
pub struct RegistrationClient {
    limiter: Arc<WindowLimiter>,
    ticker: WindowTicker,
    encoder: Arc<dyn DocumentEncoder>,
    transport: Arc<dyn Transport>,
    endpoint: Url,
}

impl RegistrationClient {
    /// Create a client with the default JSON encoder and HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))
            .map_err(QuotagateError::Transport)?;
        Self::with_collaborators(config, Arc::new(JsonEncoder), Arc::new(transport))
    }

    /// Create a client with explicit encoder and transport implementations.
    pub fn with_collaborators(
        config: ClientConfig,
        encoder: Arc<dyn DocumentEncoder>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| QuotagateError::Config(format!("invalid endpoint URL: {e}")))?;

        let limiter = Arc::new(WindowLimiter::new(config.capacity)?);
        let ticker = WindowTicker::start(Arc::clone(&limiter), config.window.duration());

        Ok(Self {
            limiter,
            ticker,
            encoder,
            transport,
            endpoint,
        })
    }

    /// Submit a document for registration.
    ///
    /// Waits for a submission slot, encodes the document, and starts the
    /// transport call. Encoding failures are returned synchronously; the
    /// transport outcome is reported through the returned handle. In both
    /// cases the slot is released when the submission concludes.
    pub async fn submit(&self, document: &Document, signature: &str) -> Result<SubmissionHandle> {
        let permit = Arc::clone(&self.limiter).acquire().await;
        debug!(available = self.limiter.available(), "Slot acquired");

        // The slot was already consumed; give it back before surfacing an
        // encoding failure.
        let body = match self.encoder.encode(document) {
            Ok(body) => body,
            Err(e) => {
                drop(permit);
                return Err(QuotagateError::Encode(e));
            }
        };

        let request = SubmitRequest {
            endpoint: self.endpoint.clone(),
            signature: signature.to_string(),
            body,
        };

        let transport = Arc::clone(&self.transport);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = transport.submit(request).await;
            // Slot returns when the transport completes, success or failure.
            drop(permit);

            match &outcome {
                Ok(status) => debug!(code = status.code, "Submission completed"),
                Err(e) => warn!(error = %e, "Submission failed"),
            }
            let _ = tx.send(outcome);
        });

        Ok(SubmissionHandle { rx })
    }

    /// The limiter backing this client.
    pub fn limiter(&self) -> &Arc<WindowLimiter> {
        &self.limiter
    }

    /// Stop the window ticker. Outstanding submissions still complete, but
    /// capacity is no longer replenished.
    pub fn shutdown(&self) {
        self.ticker.stop();
    }
}

/// Pending outcome of a started submission.
#[must_use]
pub struct SubmissionHandle {
    rx: oneshot::Receiver<std::result::Result<SubmitStatus, TransportError>>,
}

impl SubmissionHandle {
    /// Await the transport's completion for this submission.
    pub async fn completion(self) -> Result<SubmitStatus> {
        match self.rx.await {
            Ok(outcome) => outcome.map_err(QuotagateError::Transport),
            Err(_) => Err(QuotagateError::Transport(TransportError::Aborted)),
        }
    }
}
