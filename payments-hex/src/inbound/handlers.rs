//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use payments_types::{
    AppError, CreatePaymentRequest, ErrorKind, OrderGateway, PaymentCollection, PaymentId,
    PaymentRepository,
};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository, O: OrderGateway> {
    pub service: PaymentService<R, O>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::InvalidArgument | ErrorKind::IllegalState => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Service => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let mut body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });
        if let AppError::Diverged { payment_id, .. } = &self.0 {
            body["payment_id"] = serde_json::json!(payment_id);
        }

        (status, Json(body)).into_response()
    }
}

fn parse_payment_id(raw: &str) -> Result<PaymentId, ApiError> {
    raw.parse()
        .map_err(|_| AppError::InvalidArgument(format!("Invalid payment ID: {:?}", raw)).into())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List payments whose order is currently in payment.
#[tracing::instrument(skip(state))]
pub async fn list_payments<R: PaymentRepository, O: OrderGateway>(
    State(state): State<Arc<AppState<R, O>>>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.service.list_in_payment().await?;
    Ok(Json(PaymentCollection::from(payments)))
}

/// Get a payment with its live order.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R: PaymentRepository, O: OrderGateway>(
    State(state): State<Arc<AppState<R, O>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;
    let payment = state.service.get_payment(payment_id).await?;
    Ok(Json(payment))
}

/// Start a payment for an order.
#[tracing::instrument(skip(state, req))]
pub async fn create_payment<R: PaymentRepository, O: OrderGateway>(
    State(state): State<Arc<AppState<R, O>>>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.create_payment(req).await?;
    Ok(Json(payment))
}

/// Advance a payment one status step.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn advance_payment<R: PaymentRepository, O: OrderGateway>(
    State(state): State<Arc<AppState<R, O>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;
    let payment = state.service.advance_payment(payment_id).await?;
    Ok(Json(payment))
}

/// Cancel (soft delete) a payment.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn cancel_payment<R: PaymentRepository, O: OrderGateway>(
    State(state): State<Arc<AppState<R, O>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = parse_payment_id(&id)?;
    state.service.cancel_payment(payment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}
