//! Error types for the payment service.

use crate::domain::{OrderId, PaymentId};

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Payment is already COMPLETED and cannot be updated further")]
    AlreadyCompleted,

    #[error("Payment is CANCELED and cannot be updated")]
    CanceledNotUpdatable,

    #[error("Cannot cancel a completed payment")]
    CancelCompleted,

    #[error("Payment is already canceled")]
    AlreadyCanceled,

    #[error(
        "Cannot start the payment of an order that is not ordered or already in a payment process (order {order_id} is {status})"
    )]
    OrderNotStartable { order_id: OrderId, status: String },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    /// The row changed since it was read.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Failures reported by the remote Order service accessor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderError {
    #[error("Order with ID {0} not found")]
    NotFound(OrderId),

    /// Transport failure or timeout.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),

    /// Unexpected status code or undecodable body.
    #[error("Invalid response from order service: {0}")]
    InvalidResponse(String),
}

/// Coarse classification of an [`AppError`], enough to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    IllegalState,
    Conflict,
    Service,
    Internal,
}

/// Application-level errors returned by the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    IllegalState(String),

    #[error("{0}")]
    Conflict(String),

    /// A call to the Order service failed; nothing was written locally.
    #[error("{message}")]
    Service {
        message: String,
        #[source]
        source: Option<OrderError>,
    },

    /// The payment was committed locally but the Order service was not updated.
    #[error("Payment {payment_id} saved but failed to update order {order_id} status: {source}")]
    Diverged {
        payment_id: PaymentId,
        order_id: OrderId,
        #[source]
        source: OrderError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::IllegalState(_) => ErrorKind::IllegalState,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Service { .. } | AppError::Diverged { .. } => ErrorKind::Service,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Wraps an Order service failure, keeping it as the error source.
    pub fn service(message: impl Into<String>, source: OrderError) -> Self {
        AppError::Service {
            message: message.into(),
            source: Some(source),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::AlreadyCompleted | DomainError::CanceledNotUpdatable => {
                AppError::IllegalState(err.to_string())
            }
            DomainError::CancelCompleted
            | DomainError::AlreadyCanceled
            | DomainError::OrderNotStartable { .. }
            | DomainError::ValidationError(_) => AppError::InvalidArgument(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}
