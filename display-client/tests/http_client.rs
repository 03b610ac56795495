// display-client/tests/http_client.rs
// HTTP client tests against a local axum server

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use display_client::{
    CartApiClient, CartSource, ClientError, DisplayConfig, DisplayEvent, DisplaySync, PaymentState,
};
use shared::EnvelopeError;

const EMPTY_CART: &str = r#"{
    "success": true,
    "cart": {
        "items": [],
        "discount": {"type": "fixed", "value": 0},
        "tax": {"rate": 0, "amount": 0},
        "customer": null,
        "notes": "",
        "total": 0,
        "lastUpdated": null
    },
    "timestamp": "2024-01-01T00:00:00Z"
}"#;

const PROCESSING: &str = r#"{
    "success": true,
    "paymentStatus": {
        "status": "processing",
        "timestamp": "2024-01-01T00:00:05Z",
        "amount": 25.50,
        "method": null,
        "transactionId": null
    }
}"#;

fn json(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], body)
}

/// Serve `router` under `/api` on an ephemeral port, returning the base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().nest("/api", router))
            .await
            .unwrap();
    });
    format!("http://{addr}/api")
}

fn client(base_url: &str) -> CartApiClient {
    DisplayConfig::new(base_url).build_client().unwrap()
}

#[tokio::test]
async fn test_fetch_empty_cart() {
    let base_url = serve(Router::new().route("/cart", get(|| async { json(EMPTY_CART) }))).await;

    let cart = client(&base_url).fetch_cart().await.expect("cart should be present");
    assert!(cart.items.is_empty());
    assert_eq!(cart.total, 0.0);
    assert!(cart.customer.is_none());
}

#[tokio::test]
async fn test_fetch_processing_payment() {
    let base_url =
        serve(Router::new().route("/cart/payment", get(|| async { json(PROCESSING) }))).await;

    let status = client(&base_url)
        .fetch_payment_status()
        .await
        .expect("payment status should be present");
    assert_eq!(status.status, PaymentState::Processing);
    assert_eq!(status.timestamp.as_deref(), Some("2024-01-01T00:00:05Z"));
    assert_eq!(status.amount, 25.5);
    assert!(status.method.is_none());
    assert!(status.transaction_id.is_none());
}

#[tokio::test]
async fn test_requests_send_json_content_type() {
    async fn cart(headers: HeaderMap) -> axum::response::Response {
        match headers.get(header::CONTENT_TYPE) {
            Some(value) if value == "application/json" => json(EMPTY_CART).into_response(),
            _ => StatusCode::BAD_REQUEST.into_response(),
        }
    }

    let base_url = serve(Router::new().route("/cart", get(cart))).await;
    assert!(client(&base_url).try_fetch_cart().await.is_ok());
}

#[tokio::test]
async fn test_rejected_envelope_is_absent() {
    let base_url = serve(
        Router::new()
            .route(
                "/cart",
                get(|| async { json(r#"{"success": false, "error": "no register", "timestamp": "t"}"#) }),
            )
            .route("/cart/payment", get(|| async { json(r#"{"success": false}"#) })),
    )
    .await;
    let client = client(&base_url);

    match client.try_fetch_cart().await {
        Err(ClientError::Envelope(EnvelopeError::Rejected(reason))) => {
            assert_eq!(reason.as_deref(), Some("no register"));
        }
        other => panic!("expected rejected envelope, got {other:?}"),
    }
    assert!(client.fetch_cart().await.is_none());
    assert!(client.fetch_payment_status().await.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_absent() {
    let base_url = serve(
        Router::new()
            .route("/cart", get(|| async { json("<html>maintenance</html>") }))
            .route(
                "/cart/payment",
                get(|| async { json(r#"{"success": true, "paymentStatus": {"amount": 1}}"#) }),
            ),
    )
    .await;
    let client = client(&base_url);

    assert!(matches!(client.try_fetch_cart().await, Err(ClientError::Decode(_))));
    // status field missing
    assert!(matches!(
        client.try_fetch_payment_status().await,
        Err(ClientError::Decode(_))
    ));
    assert!(client.fetch_cart().await.is_none());
}

#[tokio::test]
async fn test_http_error_status_is_absent() {
    let base_url = serve(Router::new().route(
        "/cart",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
    ))
    .await;
    let client = client(&base_url);

    match client.try_fetch_cart().await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "down for maintenance");
        }
        other => panic!("expected status error, got {other:?}"),
    }

    // Unrouted endpoint answers 404
    assert!(matches!(
        client.try_fetch_payment_status().await,
        Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn test_connection_refused_is_absent() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}/api"));
    assert!(matches!(client.try_fetch_cart().await, Err(ClientError::Http(_))));
    assert!(client.fetch_payment_status().await.is_none());
}

#[tokio::test]
async fn test_stalled_response_times_out() {
    let base_url = serve(Router::new().route(
        "/cart",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            json(EMPTY_CART)
        }),
    ))
    .await;

    let config = DisplayConfig::new(&base_url)
        .with_read_timeout(Duration::from_millis(200))
        .with_write_timeout(Duration::from_millis(200));
    let client = config.build_client().unwrap();

    let started = std::time::Instant::now();
    let err = client.try_fetch_cart().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_sync_against_live_server() {
    let base_url = serve(
        Router::new()
            .route("/cart", get(|| async { json(EMPTY_CART) }))
            .route("/cart/payment", get(|| async { json(PROCESSING) })),
    )
    .await;

    let config = DisplayConfig::new(&base_url).with_poll_interval(Duration::from_millis(20));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<DisplayEvent>();
    let handle = DisplaySync::new(config.build_client().unwrap(), tx, config.poll_interval()).start();

    let mut events = Vec::new();
    while events.len() < 4 {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("sync loop should keep delivering")
            .expect("channel open while running");
        events.push(event);
    }
    handle.stop().await;

    // Identical responses produce identical snapshots every tick
    assert_eq!(events[0], events[2]);
    assert_eq!(events[1], events[3]);
    match &events[0] {
        DisplayEvent::Cart(Some(cart)) => assert!(cart.is_empty()),
        other => panic!("expected cart first, got {other:?}"),
    }
    match &events[1] {
        DisplayEvent::PaymentStatus(Some(status)) => {
            assert_eq!(status.status, PaymentState::Processing)
        }
        other => panic!("expected payment second, got {other:?}"),
    }
}
