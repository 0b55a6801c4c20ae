//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use payments_types::{
    CreatePaymentRequest, OrderId, PaymentCollection, PaymentId, PaymentResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists payments whose order is currently in payment.
    pub async fn list_payments(&self) -> Result<Vec<PaymentResponse>, ClientError> {
        let page: PaymentCollection = self.get("/api/payments").await?;
        Ok(page.collection)
    }

    /// Gets a payment by ID, with its live order.
    pub async fn get_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        self.get(&format!("/api/payments/{}", id)).await
    }

    /// Starts a payment for an order.
    pub async fn create_payment(&self, order_id: OrderId) -> Result<PaymentResponse, ClientError> {
        let req = CreatePaymentRequest::for_order(order_id);
        self.post("/api/payments", &req).await
    }

    /// Advances a payment one status step.
    pub async fn advance_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        let resp = self
            .http
            .patch(format!("{}/api/payments/{}", self.base_url, id))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Cancels a payment.
    pub async fn cancel_payment(&self, id: PaymentId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/api/payments/{}", self.base_url, id))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{delete, get},
    };

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_client_creation() {
        let client = PaymentsClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PaymentsClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_list_unwraps_collection() {
        let app = Router::new().route(
            "/api/payments",
            get(|| async { Json(serde_json::json!({ "collection": [] })) }),
        );
        let client = PaymentsClient::new(serve(app).await);

        let payments = client.list_payments().await.unwrap();

        assert!(payments.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_message_is_decoded() {
        let app = Router::new().route(
            "/api/payments/{id}",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "error": "Payment with id: 4 not found", "code": 404 })),
                )
            }),
        );
        let client = PaymentsClient::new(serve(app).await);

        let err = client.get_payment(PaymentId::new(4)).await.unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Payment with id: 4 not found");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancel_accepts_no_content() {
        let app = Router::new().route(
            "/api/payments/{id}",
            delete(|| async { StatusCode::NO_CONTENT }),
        );
        let client = PaymentsClient::new(serve(app).await);

        client.cancel_payment(PaymentId::new(1)).await.unwrap();
    }
}
