//! Read-only projection of an Order owned by the remote Order service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a remote Order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct OrderId(i64);

impl OrderId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Order status values this service cares about. Anything else is opaque.
pub mod order_status {
    /// The only status from which a payment may be started.
    pub const ORDERED: &str = "ORDERED";
    /// Set by the Order service once a payment has been started.
    pub const IN_PAYMENT: &str = "IN_PAYMENT";
}

/// Snapshot of a remote Order.
///
/// The descriptive fields are passed through as received and never
/// interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub order_id: OrderId,
    /// Free-form status string owned by the Order service.
    #[schema(example = "IN_PAYMENT")]
    pub order_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

impl Order {
    /// Creates an order snapshot with no descriptive fields.
    pub fn new(order_id: OrderId, order_status: impl Into<String>) -> Self {
        Self {
            order_id,
            order_status: order_status.into(),
            ordered_at: None,
            description: None,
            fee: None,
        }
    }

    /// Exact match against `ORDERED`.
    pub fn is_orderable(&self) -> bool {
        self.order_status == order_status::ORDERED
    }

    /// Case-insensitive match against `IN_PAYMENT`.
    pub fn is_in_payment(&self) -> bool {
        self.order_status
            .eq_ignore_ascii_case(order_status::IN_PAYMENT)
    }
}
