//! Transport boundary between the session and the remote scanner.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;

use crate::compiler::WireQuery;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::retry::RetryConfig;
use crate::throttling::RequestPacer;

/// One row as returned by the service: symbol plus positional values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "d", default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawResponse {
    pub total_count: u64,
    pub rows: Vec<RawRow>,
}

/// Sends a compiled query and returns the raw result.
///
/// Implementations own any retry policy; the session calls `send` exactly
/// once per execution and passes failures through unchanged.
pub trait ScreenerTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        query: &'a WireQuery,
    ) -> Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>>;
}

#[derive(Debug, Deserialize)]
struct ScanEnvelope {
    #[serde(rename = "totalCount", default)]
    total_count: u64,
    #[serde(default)]
    data: Option<Vec<RawRow>>,
    #[serde(default)]
    error: Option<String>,
}

/// Decodes a scanner response body.
pub fn decode_response(body: &str) -> Result<RawResponse, TransportError> {
    let envelope: ScanEnvelope = serde_json::from_str(body).map_err(|e| {
        TransportError::non_retryable(format!("malformed scanner response: {e}"))
    })?;

    if let Some(message) = envelope.error.filter(|message| !message.is_empty()) {
        return Err(TransportError::non_retryable(format!(
            "scanner rejected query: {message}"
        )));
    }

    Ok(RawResponse {
        total_count: envelope.total_count,
        rows: envelope.data.unwrap_or_default(),
    })
}

/// Default transport: POST to `<base>/<market>/scan` with pacing and retries.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    timeout_ms: u64,
    http_client: Arc<dyn HttpClient>,
    pacer: RequestPacer,
    retry: RetryConfig,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http_client = ReqwestHttpClient::new(&config.user_agent)?;
        Ok(Self::with_http_client(config, Arc::new(http_client)))
    }

    pub fn with_http_client(config: &ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
            http_client,
            pacer: RequestPacer::per_minute(config.requests_per_minute),
            retry: RetryConfig::exponential(config.max_retries),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(&self, url: &str, body: &[u8]) -> Result<RawResponse, TransportError> {
        self.pacer.acquire().await;

        let request = HttpRequest::post(url, body.to_vec())
            .with_header("content-type", "application/json")
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let snippet: String = response.body.chars().take(200).collect();
            return Err(TransportError::non_retryable(format!(
                "scanner returned HTTP {}: {snippet}",
                response.status
            ))
            .with_status(response.status));
        }

        decode_response(&response.body)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ScreenerTransport for HttpTransport {
    fn send<'a>(
        &'a self,
        query: &'a WireQuery,
    ) -> Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let url = query.endpoint(&self.base_url);
            let body = query.to_bytes().map_err(|e| {
                TransportError::non_retryable(format!("failed to encode query: {e}"))
            })?;

            let mut attempt = 0u32;
            loop {
                let started = Instant::now();
                match self.send_once(&url, &body).await {
                    Ok(response) => {
                        tracing::debug!(
                            url = %url,
                            attempt,
                            rows = response.rows.len(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "scanner request succeeded"
                        );
                        return Ok(response);
                    }
                    Err(error) if self.retry.should_retry(&error, attempt) => {
                        let delay = self.retry.delay_for_attempt(attempt);
                        tracing::warn!(
                            url = %url,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %error,
                            "scanner request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    Err(error) => return Err(error),
                }
            }
        })
    }
}
