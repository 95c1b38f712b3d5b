//! Behaviour tests for the HTTP transport against a recording fake client.

mod support;

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ferroscreen_core::{
    compile, ClientConfig, HttpClient, HttpRequest, HttpResponse, HttpTransport, RetryConfig,
    ScreenerKind, ScreenerQuery, ScreenerSession, ScreenerTransport, TransportError, WireQuery,
};
use serde_json::{json, Value};
use support::field;

#[derive(Debug, Default)]
struct RecordingHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    fn scripted(responses: impl IntoIterator<Item = Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            self.responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::ok_json(r#"{"totalCount":0,"data":[]}"#)))
        })
    }
}

fn status(code: u16) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status: code,
        body: String::from("{}"),
    })
}

fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_base_url("http://scanner.test")
        .with_requests_per_minute(6_000)
}

fn transport_with(client: &Arc<RecordingHttpClient>, retry: RetryConfig) -> HttpTransport {
    HttpTransport::with_http_client(&test_config(), Arc::clone(client) as Arc<dyn HttpClient>)
        .with_retry(retry)
}

fn crypto_query() -> WireQuery {
    let query = ScreenerQuery::new(ScreenerKind::Crypto)
        .select([field("NAME"), field("PRICE")])
        .filter(field("VOLUME").gt(1_000_000));
    compile(&query).expect("valid crypto query")
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn posts_compiled_body_to_market_scan_endpoint() {
    // Given: A client answering with two rows
    let client = Arc::new(RecordingHttpClient::scripted([Ok(HttpResponse::ok_json(
        r#"{"totalCount":42,"data":[{"s":"BINANCE:BTCUSDT","d":["BTCUSDT",65000.5]},{"s":"BINANCE:ETHUSDT","d":["ETHUSDT",3100]}]}"#,
    ))]));
    let transport = transport_with(&client, RetryConfig::no_retry());
    let query = crypto_query();

    // When: The compiled query is sent
    let response = transport.send(&query).await.expect("send succeeds");

    // Then: One JSON POST hit the crypto endpoint with the compiled body
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://scanner.test/crypto/scan");
    assert_eq!(
        requests[0].headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body, query.to_json().expect("wire json"));
    assert_eq!(body["columns"], json!(["name", "close"]));

    // And: Rows come back positional and untouched
    assert_eq!(response.total_count, 42);
    assert_eq!(response.rows.len(), 2);
    assert_eq!(response.rows[0].symbol, "BINANCE:BTCUSDT");
    assert_eq!(response.rows[0].values, vec![json!("BTCUSDT"), json!(65000.5)]);
}

#[tokio::test]
async fn session_over_http_transport_materializes_table() {
    let client = Arc::new(RecordingHttpClient::scripted([Ok(HttpResponse::ok_json(
        r#"{"totalCount":1,"data":[{"s":"NASDAQ:AAPL","d":["AAPL",190.1]}]}"#,
    ))]));
    let transport = transport_with(&client, RetryConfig::no_retry());
    let session = ScreenerSession::new(ScreenerKind::Stock, Arc::new(transport));
    session
        .select([field("NAME"), field("PRICE")])
        .set_tickers(["NASDAQ:AAPL"]);

    let table = session.execute().await.expect("execution");

    assert_eq!(client.requests()[0].url, "http://scanner.test/america/scan");
    assert_eq!(table.get(0, "close"), Some(&json!(190.1)));
    assert_eq!(table.rows[0].symbol, "NASDAQ:AAPL");
}

// =============================================================================
// Retry policy
// =============================================================================

#[tokio::test]
async fn throttled_request_is_retried_until_it_succeeds() {
    // Given: Two 429 answers followed by a success
    let client = Arc::new(RecordingHttpClient::scripted([status(429), status(429)]));
    let transport = transport_with(&client, RetryConfig::fixed(Duration::from_millis(1), 3));

    // When: The query is sent
    let response = transport.send(&crypto_query()).await;

    // Then: The third attempt succeeded
    assert!(response.is_ok());
    assert_eq!(client.requests().len(), 3);
}

#[tokio::test]
async fn client_error_status_is_not_retried() {
    // Given: A 400 answer
    let client = Arc::new(RecordingHttpClient::scripted([status(400)]));
    let transport = transport_with(&client, RetryConfig::fixed(Duration::from_millis(1), 3));

    // When: The query is sent
    let err = transport.send(&crypto_query()).await.expect_err("bad request");

    // Then: It failed once and kept the status
    assert_eq!(err.status(), Some(400));
    assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn retries_stop_after_the_configured_budget() {
    // Given: A service that is always unavailable
    let client = Arc::new(RecordingHttpClient::scripted(
        std::iter::repeat_with(|| status(503)).take(10),
    ));
    let transport = transport_with(&client, RetryConfig::fixed(Duration::from_millis(1), 2));

    // When: The query is sent
    let err = transport.send(&crypto_query()).await.expect_err("exhausted");

    // Then: One attempt plus two retries
    assert_eq!(err.status(), Some(503));
    assert_eq!(client.requests().len(), 3);
}

#[tokio::test]
async fn network_failures_follow_their_retryable_flag() {
    let client = Arc::new(RecordingHttpClient::scripted([
        Err(TransportError::new("connection reset")),
        Err(TransportError::non_retryable("invalid url")),
    ]));
    let transport = transport_with(&client, RetryConfig::fixed(Duration::from_millis(1), 5));

    let err = transport.send(&crypto_query()).await.expect_err("fatal error");

    assert_eq!(err.message(), "invalid url");
    assert_eq!(client.requests().len(), 2);
}

// =============================================================================
// Response decoding
// =============================================================================

#[tokio::test]
async fn service_error_body_surfaces_as_transport_error() {
    let client = Arc::new(RecordingHttpClient::scripted([Ok(HttpResponse::ok_json(
        r#"{"totalCount":0,"error":"Unknown field \"bogus\""}"#,
    ))]));
    let transport = transport_with(&client, RetryConfig::fixed(Duration::from_millis(1), 3));

    let err = transport.send(&crypto_query()).await.expect_err("service error");

    assert!(err.message().contains("bogus"));
    assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn empty_data_is_an_empty_page() {
    let client = Arc::new(RecordingHttpClient::scripted([Ok(HttpResponse::ok_json(
        r#"{"totalCount":0,"data":null}"#,
    ))]));
    let transport = transport_with(&client, RetryConfig::no_retry());

    let response = transport.send(&crypto_query()).await.expect("empty page");

    assert_eq!(response.total_count, 0);
    assert!(response.rows.is_empty());
}
