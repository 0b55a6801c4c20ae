//! Payment store port.
//!
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{NewPayment, Payment, PaymentId};
use crate::error::RepoError;

/// Storage port for payments.
///
/// `insert` and `update` together form the store's upsert. Writes are atomic
/// per row; nothing here spans more than one row.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Returns every stored payment in store iteration order.
    async fn find_all(&self) -> Result<Vec<Payment>, RepoError>;

    /// Gets a payment by ID.
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Persists a new payment, assigning its id and version 0.
    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError>;

    /// Writes back a mutated payment.
    ///
    /// Succeeds only if the stored version still equals `payment.version`;
    /// the returned payment carries the bumped version. A stale version
    /// yields `RepoError::Conflict`, a missing row `RepoError::NotFound`.
    async fn update(&self, payment: &Payment) -> Result<Payment, RepoError>;
}
