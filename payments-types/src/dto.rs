//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Order, OrderId, Payment, PaymentId, PaymentStatus};

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Reference to the order a new payment is for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderReference {
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

/// Request to start a payment for an order.
///
/// Both levels are optional on the wire so a missing reference is reported
/// as an invalid argument rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub order: Option<OrderReference>,
}

impl CreatePaymentRequest {
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            order: Some(OrderReference {
                order_id: Some(order_id),
            }),
        }
    }

    /// The referenced order id, if both the reference and its id are present.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order.as_ref().and_then(|o| o.order_id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// A payment as returned to callers, optionally enriched with its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
    /// Optimistic-concurrency token of the stored row
    #[schema(example = 0)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Live order snapshot; absent when the operation did not consult the Order service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl PaymentResponse {
    /// Maps a payment without order context.
    pub fn bare(payment: Payment) -> Self {
        Self {
            payment_id: payment.id,
            order_id: payment.order_id,
            is_payed: payment.is_payed,
            payment_status: payment.status,
            version: payment.version,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
            order: None,
        }
    }

    /// Maps a payment with a freshly fetched order attached.
    pub fn enriched(payment: Payment, order: Order) -> Self {
        Self {
            order: Some(order),
            ..Self::bare(payment)
        }
    }
}

/// Collection envelope for list responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PaymentCollection {
    pub collection: Vec<PaymentResponse>,
}

impl From<Vec<PaymentResponse>> for PaymentCollection {
    fn from(collection: Vec<PaymentResponse>) -> Self {
        Self { collection }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_order_deserializes() {
        let req: CreatePaymentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.order_id().is_none());

        let req: CreatePaymentRequest = serde_json::from_str(r#"{"order": {}}"#).unwrap();
        assert!(req.order_id().is_none());

        let req: CreatePaymentRequest =
            serde_json::from_str(r#"{"order": {"order_id": 5}}"#).unwrap();
        assert_eq!(req.order_id(), Some(OrderId::new(5)));
    }

    #[test]
    fn test_bare_response_omits_order() {
        let now = Utc::now();
        let payment = Payment {
            id: PaymentId::new(1),
            order_id: OrderId::new(2),
            is_payed: false,
            status: PaymentStatus::InProgress,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(PaymentResponse::bare(payment)).unwrap();

        assert_eq!(json["payment_id"], 1);
        assert_eq!(json["order_id"], 2);
        assert_eq!(json["payment_status"], "IN_PROGRESS");
        assert!(json.get("order").is_none());
    }
}
