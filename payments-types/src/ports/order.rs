//! Remote Order service port.
//!
//! The HTTP client in `orders-client` implements this; tests use doubles.

use crate::domain::{Order, OrderId};
use crate::error::OrderError;

/// Capability to read and status-patch orders owned by the Order service.
///
/// Timeouts are the implementation's responsibility: a stalled call must
/// eventually resolve to `OrderError::Unavailable`.
#[async_trait::async_trait]
pub trait OrderGateway: Send + Sync + 'static {
    /// Fetches an order, distinguishing "not found" from transport failures.
    async fn get_by_id(&self, order_id: OrderId) -> Result<Order, OrderError>;

    /// Asks the Order service to move the order to its next status.
    async fn patch_status(&self, order_id: OrderId) -> Result<(), OrderError>;
}
