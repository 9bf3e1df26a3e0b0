//! Integration tests for the Binance venue adapter against a mock HTTP server.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use twap_engine::{
    BinanceConfig, BinanceEnvironment, BinanceVenueAdapter, ClientOrderId, DispatchSettings,
    ExecuteTwapUseCase, ExecutionStatus, NoOpAuditSink, OrderSide, OrderVenue, PlaceOrderRequest,
    RetryConfig, Symbol, TokioScheduler, TwapFields, VenueError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer, retry: RetryConfig) -> BinanceVenueAdapter {
    let config = BinanceConfig::new(
        "test-key".to_string(),
        "test-secret".to_string(),
        BinanceEnvironment::Testnet,
    )
    .with_base_url(server.uri())
    .with_timeout(Duration::from_secs(2))
    .with_retry(retry);
    BinanceVenueAdapter::new(config).unwrap()
}

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(5),
        max_backoff: Duration::from_millis(20),
        multiplier: 2.0,
        jitter_factor: 0.0,
    }
}

fn limit_request(client_id: &str) -> PlaceOrderRequest {
    PlaceOrderRequest::limit(
        ClientOrderId::new(client_id),
        Symbol::new("BTCUSDT"),
        OrderSide::Buy,
        dec!(0.25),
        dec!(60000),
    )
}

fn order_response(order_id: i64, client_id: &str) -> serde_json::Value {
    json!({
        "orderId": order_id,
        "symbol": "BTCUSDT",
        "status": "NEW",
        "clientOrderId": client_id,
        "price": "60000",
        "origQty": "0.250",
        "executedQty": "0",
        "timeInForce": "GTC",
        "type": "LIMIT",
        "side": "BUY",
        "updateTime": 1_700_000_000_000_i64
    })
}

#[tokio::test]
async fn test_signed_limit_order_is_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(header("X-MBX-APIKEY", "test-key"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("side", "BUY"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("quantity", "0.25"))
        .and(query_param("price", "60000"))
        .and(query_param("timeInForce", "GTC"))
        .and(query_param("newClientOrderId", "twap-abc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response(4_001, "twap-abc-1")))
        .expect(1)
        .mount(&server)
        .await;

    let ack = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap();

    assert_eq!(ack.order_id.as_str(), "4001");
    assert_eq!(ack.client_order_id.as_str(), "twap-abc-1");
    assert_eq!(ack.status, "NEW");

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("recvWindow=5000"));
    assert!(query.contains("timestamp="));
    assert!(query.contains("&signature="));
}

#[tokio::test]
async fn test_market_order_sends_no_price() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(query_param("type", "MARKET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response(4_002, "mkt-1")))
        .mount(&server)
        .await;

    let request = PlaceOrderRequest::market(
        ClientOrderId::new("mkt-1"),
        Symbol::new("BTCUSDT"),
        OrderSide::Sell,
        dec!(0.1),
    );
    adapter(&server, fast_retry()).place_order(request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("price="));
    assert!(!query.contains("timeInForce="));
}

#[tokio::test]
async fn test_api_error_is_rejection_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": -2019, "msg": "Margin is insufficient."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        VenueError::Rejected {
            code: -2019,
            reason: "Margin is insufficient.".to_string()
        }
    );
}

#[tokio::test]
async fn test_unauthorized_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": -2015, "msg": "Invalid API-key, IP, or permissions for action."})),
        )
        .mount(&server)
        .await;

    let err = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, VenueError::AuthenticationFailed { .. }));
}

#[tokio::test]
async fn test_server_error_is_unknown_status_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, VenueError::UnknownStatus { .. }));
}

#[tokio::test]
async fn test_read_timeout_is_unknown_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(order_response(4_003, "twap-abc-1"))
                .set_delay(Duration::from_secs(5)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, VenueError::UnknownStatus { .. }));
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"code": -1003, "msg": "Too many requests."})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response(4_004, "twap-abc-1")))
        .expect(1)
        .mount(&server)
        .await;

    let ack = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap();

    assert_eq!(ack.order_id.as_str(), "4004");
}

#[tokio::test]
async fn test_rate_limit_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let err = adapter(&server, fast_retry())
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap_err();

    assert_eq!(err, VenueError::RateLimited);
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let config = BinanceConfig::new(
        "test-key".to_string(),
        "test-secret".to_string(),
        BinanceEnvironment::Testnet,
    )
    .with_base_url("http://127.0.0.1:1")
    .with_retry(fast_retry());
    let adapter = BinanceVenueAdapter::new(config).unwrap();

    let err = adapter
        .place_order(limit_request("twap-abc-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, VenueError::Connection { .. }));
}

#[tokio::test]
async fn test_twap_through_binance_adapter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response(5_000, "twap")))
        .expect(3)
        .mount(&server)
        .await;

    let use_case = ExecuteTwapUseCase::new(
        Arc::new(adapter(&server, fast_retry())),
        Arc::new(TokioScheduler::new(CancellationToken::new())),
        Arc::new(NoOpAuditSink),
        DispatchSettings::default(),
    );

    let report = use_case
        .execute(&TwapFields {
            symbol: "BTCUSDT".to_string(),
            side: "SELL".to_string(),
            total_quantity: dec!(0.3),
            limit_price: dec!(61000),
            chunk_count: 3,
            interval_seconds: 0,
            dry_run: false,
        })
        .await
        .unwrap();

    assert_eq!(report.status(), ExecutionStatus::Completed);
    assert_eq!(report.executed_quantity(), dec!(0.3));

    let client_ids: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "newClientOrderId")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(client_ids.len(), 3);
    assert!(client_ids[0].ends_with("-1"));
    assert!(client_ids[1].ends_with("-2"));
    assert!(client_ids[2].ends_with("-3"));
    assert!(client_ids.iter().all(|id| id.len() <= 36));
}
