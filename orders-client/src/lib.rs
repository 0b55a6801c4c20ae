//! # Orders Client
//!
//! reqwest-based adapter implementing the `OrderGateway` port against the
//! remote Order service.
//!
//! Endpoints used, relative to the configured base URL:
//! - `GET {base}/{orderId}` - read an order
//! - `PATCH {base}/{orderId}/status` - move an order to its next status (no body)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use payments_types::{Order, OrderError, OrderGateway, OrderId};

/// Order as serialized by the Order service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderPayload {
    order_id: i64,
    order_status: String,
    #[serde(default)]
    order_date: Option<serde_json::Value>,
    #[serde(default)]
    order_desc: Option<String>,
    #[serde(default)]
    order_fee: Option<f64>,
}

impl OrderPayload {
    fn into_domain(self) -> Order {
        // The date format belongs to the Order service; keep it verbatim.
        let ordered_at = self.order_date.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

        Order {
            order_id: OrderId::new(self.order_id),
            order_status: self.order_status,
            ordered_at,
            description: self.order_desc,
            fee: self.order_fee,
        }
    }
}

/// HTTP client for the Order service.
#[derive(Clone)]
pub struct OrderServiceClient {
    base_url: String,
    http: Client,
}

impl OrderServiceClient {
    /// Creates a client; every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn order_url(&self, order_id: OrderId) -> String {
        format!("{}/{}", self.base_url, order_id)
    }
}

fn transport_error(err: reqwest::Error) -> OrderError {
    if err.is_timeout() {
        OrderError::Unavailable(format!("request timed out: {}", err))
    } else {
        OrderError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl OrderGateway for OrderServiceClient {
    #[tracing::instrument(skip(self), fields(order_id = %order_id))]
    async fn get_by_id(&self, order_id: OrderId) -> Result<Order, OrderError> {
        let resp = self
            .http
            .get(self.order_url(order_id))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(OrderError::NotFound(order_id));
        }
        if !status.is_success() {
            return Err(OrderError::InvalidResponse(format!(
                "GET order {} returned {}",
                order_id, status
            )));
        }

        let body = resp.text().await.map_err(transport_error)?;
        // The Order service answers an unknown id with an empty 200.
        if body.trim().is_empty() {
            return Err(OrderError::NotFound(order_id));
        }

        let payload: OrderPayload = serde_json::from_str(&body)
            .map_err(|e| OrderError::InvalidResponse(format!("order {}: {}", order_id, e)))?;

        tracing::debug!(order_status = %payload.order_status, "fetched order");
        Ok(payload.into_domain())
    }

    #[tracing::instrument(skip(self), fields(order_id = %order_id))]
    async fn patch_status(&self, order_id: OrderId) -> Result<(), OrderError> {
        let resp = self
            .http
            .patch(format!("{}/status", self.order_url(order_id)))
            .send()
            .await
            .map_err(transport_error)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(OrderError::NotFound(order_id)),
            s => Err(OrderError::InvalidResponse(format!(
                "PATCH order {} status returned {}",
                order_id, s
            ))),
        }
    }
}
