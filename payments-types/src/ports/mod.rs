//! Port traits (interfaces for adapters).
//!
//! The application layer depends on these traits, not concrete implementations.

mod order;
mod repository;

pub use order::OrderGateway;
pub use repository::PaymentRepository;
