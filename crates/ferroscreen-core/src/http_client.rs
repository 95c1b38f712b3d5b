use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::TransportError;

/// POST request envelope handed to an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            body,
            timeout_ms: 10_000,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Raw HTTP seam used by the default transport.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    /// Builds a client with cookie storage and the given user agent.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::non_retryable(format!("failed to build http client: {e}")))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .post(&request.url)
                .timeout(Duration::from_millis(request.timeout_ms));

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.body(request.body).send().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::new(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    TransportError::new(format!("connection failed: {e}"))
                } else {
                    TransportError::non_retryable(format!("request failed: {e}"))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::new(format!("failed to read response body: {e}")))?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::post("https://scanner.example/crypto/scan", Vec::new())
            .with_header("Content-Type", "application/json");

        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn success_covers_2xx_only() {
        assert!(HttpResponse::ok_json("{}").is_success());
        let throttled = HttpResponse {
            status: 429,
            body: String::new(),
        };
        assert!(!throttled.is_success());
    }

    #[test]
    fn client_builds_with_plain_user_agent() {
        assert!(ReqwestHttpClient::new("ferroscreen/test").is_ok());
    }

    #[test]
    fn invalid_user_agent_is_reported_instead_of_dropped() {
        let err = ReqwestHttpClient::new("ferroscreen\n/test").expect_err("newline in header");
        assert!(err.message().contains("failed to build http client"));
        assert!(!err.retryable());
    }
}
