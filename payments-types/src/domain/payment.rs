//! Payment domain model and its status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::order::OrderId;
use crate::error::DomainError;

/// Unique identifier for a Payment, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Wraps a raw store identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw store identifier.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Lifecycle status of a payment.
///
/// ```text
/// NOT_STARTED ──advance──▶ IN_PROGRESS ──advance──▶ COMPLETED
///      │                        │
///      └────────cancel──────────┴──────▶ CANCELED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    NotStarted,
    InProgress,
    Completed,
    Canceled,
}

impl PaymentStatus {
    /// The status reached by a single `advance` step.
    pub fn advanced(self) -> Result<Self, DomainError> {
        match self {
            PaymentStatus::NotStarted => Ok(PaymentStatus::InProgress),
            PaymentStatus::InProgress => Ok(PaymentStatus::Completed),
            PaymentStatus::Completed => Err(DomainError::AlreadyCompleted),
            PaymentStatus::Canceled => Err(DomainError::CanceledNotUpdatable),
        }
    }

    /// The status reached by a cancellation.
    pub fn canceled(self) -> Result<Self, DomainError> {
        match self {
            PaymentStatus::NotStarted | PaymentStatus::InProgress => Ok(PaymentStatus::Canceled),
            PaymentStatus::Completed => Err(DomainError::CancelCompleted),
            PaymentStatus::Canceled => Err(DomainError::AlreadyCanceled),
        }
    }

    /// Returns true for `COMPLETED` and `CANCELED`.
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Completed | PaymentStatus::Canceled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::NotStarted => "NOT_STARTED",
            PaymentStatus::InProgress => "IN_PROGRESS",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(PaymentStatus::NotStarted),
            "IN_PROGRESS" => Ok(PaymentStatus::InProgress),
            "COMPLETED" => Ok(PaymentStatus::Completed),
            "CANCELED" => Ok(PaymentStatus::Canceled),
            other => Err(DomainError::ValidationError(format!(
                "Unknown payment status: {}",
                other
            ))),
        }
    }
}

/// A payment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub is_payed: bool,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// A fresh, unsettled payment for the given order.
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            order_id,
            is_payed: false,
            status: PaymentStatus::NotStarted,
        }
    }
}

/// A persisted payment.
///
/// `version` is the optimistic-concurrency token: the store only accepts an
/// update whose `version` matches the stored row, then bumps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    /// Legacy settlement flag, never touched by status transitions.
    pub is_payed: bool,
    pub status: PaymentStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Moves the payment one step forward and returns the new status.
    ///
    /// On error the payment is left untouched.
    pub fn advance(&mut self) -> Result<PaymentStatus, DomainError> {
        self.status = self.status.advanced()?;
        Ok(self.status)
    }

    /// Soft-deletes the payment by moving it to `CANCELED`.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.status = self.status.canceled()?;
        Ok(())
    }
}
