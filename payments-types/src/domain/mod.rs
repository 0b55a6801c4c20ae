//! Domain models for the payment service.

pub mod order;
pub mod payment;

pub use order::{Order, OrderId, order_status};
pub use payment::{NewPayment, Payment, PaymentId, PaymentStatus};
