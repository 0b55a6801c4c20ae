//! # Payments Types
//!
//! Domain types and port traits for the payment lifecycle service.
//! No IO lives here - only data structures, the payment state machine,
//! and the traits adapters implement.
//!
//! ## Architecture
//!
//! - `domain/` - Payment, its status machine, and the remote Order projection
//! - `ports/` - `PaymentRepository` (local store) and `OrderGateway` (remote orders)
//! - `dto/` - Request/response shapes for the API boundary
//! - `error/` - Domain, repository, order-service and application errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

pub use domain::{NewPayment, Order, OrderId, Payment, PaymentId, PaymentStatus, order_status};
pub use dto::*;
pub use error::{AppError, DomainError, ErrorKind, OrderError, RepoError};
pub use ports::{OrderGateway, PaymentRepository};
