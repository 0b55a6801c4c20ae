//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{Order, OrderId, PaymentId, PaymentStatus};
use payments_types::dto::{
    CreatePaymentRequest, OrderReference, PaymentCollection, PaymentResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List payments whose order is currently in payment
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    responses(
        (status = 200, description = "Payments enriched with their live order", body = PaymentCollection),
        (status = 500, description = "Store failure")
    )
)]
async fn list_payments() {}

/// Get a payment with its live order
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment found", body = PaymentResponse),
        (status = 400, description = "Invalid payment ID"),
        (status = 404, description = "Payment not found"),
        (status = 502, description = "Order service unavailable")
    )
)]
async fn get_payment() {}

/// Start a payment for an ORDERED order
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Payment created and order moved to payment", body = PaymentResponse),
        (status = 400, description = "Missing order ID or order not startable"),
        (status = 502, description = "Order not found, Order service unavailable, or order status update failed")
    )
)]
async fn create_payment() {}

/// Advance a payment one status step
#[utoipa::path(
    patch,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment advanced", body = PaymentResponse),
        (status = 400, description = "Payment is completed or canceled"),
        (status = 404, description = "Payment not found"),
        (status = 409, description = "Payment was modified concurrently")
    )
)]
async fn advance_payment() {}

/// Cancel a payment
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment ID")
    ),
    responses(
        (status = 204, description = "Payment canceled"),
        (status = 400, description = "Payment missing, completed, or already canceled"),
        (status = 409, description = "Payment was modified concurrently")
    )
)]
async fn cancel_payment() {}

/// OpenAPI documentation for the Payments API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payments Service API",
        version = "1.0.0",
        description = "Payment lifecycle for orders owned by a remote Order service.\n\nA payment is started for an `ORDERED` order, then advanced `NOT_STARTED -> IN_PROGRESS -> COMPLETED`, or canceled before completion.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_payments,
        get_payment,
        create_payment,
        advance_payment,
        cancel_payment,
    ),
    components(
        schemas(
            CreatePaymentRequest,
            OrderReference,
            PaymentResponse,
            PaymentCollection,
            PaymentStatus,
            PaymentId,
            Order,
            OrderId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment lifecycle operations"),
    )
)]
pub struct ApiDoc;
