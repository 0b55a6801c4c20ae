//! Full payment flow through every adapter: the SDK talks to a real server
//! backed by a file-based SQLite store and a fake Order service over HTTP.
//!
//! Run with: cargo test -p payments-app --no-default-features --features sqlite

#![cfg(all(feature = "sqlite", not(feature = "postgres")))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use orders_client::OrderServiceClient;
use payments_client::{ClientError, PaymentsClient};
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use payments_types::{OrderId, PaymentStatus};
use tempfile::tempdir;
use tokio::net::TcpListener;

type Orders = Arc<Mutex<HashMap<i64, String>>>;

async fn get_order(State(orders): State<Orders>, Path(id): Path<i64>) -> Response {
    match orders.lock().unwrap().get(&id) {
        Some(status) => Json(serde_json::json!({
            "orderId": id,
            "orderStatus": status,
            "orderDate": "01-01-2024__10:00:00:000000",
            "orderDesc": "Test Order",
            "orderFee": 25.5
        }))
        .into_response(),
        None => StatusCode::OK.into_response(),
    }
}

async fn patch_order(State(orders): State<Orders>, Path(id): Path<i64>) -> StatusCode {
    match orders.lock().unwrap().get_mut(&id) {
        Some(status) => {
            *status = "IN_PAYMENT".to_string();
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_payment_lifecycle_end_to_end() {
    let orders: Orders = Arc::new(Mutex::new(HashMap::from([
        (1, "ORDERED".to_string()),
        (2, "DELIVERED".to_string()),
    ])));
    let order_service = Router::new()
        .route("/order-service/api/orders/{id}", get(get_order))
        .route("/order-service/api/orders/{id}/status", patch(patch_order))
        .with_state(orders.clone());
    let order_base = format!("{}/order-service/api/orders", spawn(order_service).await);

    let tmp = tempdir().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", tmp.path().join("payments.db").display());
    let repo = build_repo(&db_url).await.unwrap();
    let gateway = OrderServiceClient::new(order_base, Duration::from_secs(2)).unwrap();
    let server = HttpServer::new(PaymentService::new(repo, gateway));
    let client = PaymentsClient::new(spawn(server.router()).await);

    assert!(client.health().await.unwrap());

    // Start a payment; the remote order moves to IN_PAYMENT.
    let created = client.create_payment(OrderId::new(1)).await.unwrap();
    assert_eq!(created.payment_status, PaymentStatus::NotStarted);
    assert_eq!(orders.lock().unwrap()[&1], "IN_PAYMENT");

    let listed = client.list_payments().await.unwrap();
    assert_eq!(listed.len(), 1);
    let order = listed[0].order.as_ref().unwrap();
    assert_eq!(order.description.as_deref(), Some("Test Order"));
    assert_eq!(order.ordered_at.as_deref(), Some("01-01-2024__10:00:00:000000"));

    // Orders outside ORDERED are refused, and missing ones come back as a gateway error.
    match client.create_payment(OrderId::new(2)).await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, 400),
        other => panic!("expected 400, got {:?}", other.map(|p| p.payment_id)),
    }
    match client.create_payment(OrderId::new(9)).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Order with ID 9 not found");
        }
        other => panic!("expected 502, got {:?}", other.map(|p| p.payment_id)),
    }

    // Walk the state machine to the end.
    let step = client.advance_payment(created.payment_id).await.unwrap();
    assert_eq!(step.payment_status, PaymentStatus::InProgress);
    let step = client.advance_payment(created.payment_id).await.unwrap();
    assert_eq!(step.payment_status, PaymentStatus::Completed);
    assert!(!step.is_payed);

    match client.cancel_payment(created.payment_id).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Cannot cancel a completed payment");
        }
        other => panic!("expected 400, got {:?}", other),
    }

    let fetched = client.get_payment(created.payment_id).await.unwrap();
    assert_eq!(fetched.payment_status, PaymentStatus::Completed);
    assert_eq!(fetched.version, 2);
}
