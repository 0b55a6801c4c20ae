//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use payments_types::{OrderId, Payment, PaymentId, PaymentStatus, RepoError};

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};

/// Columns selected by every payment query, in `DbPayment` field order.
pub const PAYMENT_COLUMNS: &str = "id, order_id, is_payed, status, version, created_at, updated_at";

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    pub id: i64,
    pub order_id: i64,
    pub is_payed: bool,
    pub status: String,
    pub version: i64,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub updated_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub updated_at: String,
}

impl DbPayment {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let status: PaymentStatus = self.status.parse().map_err(RepoError::Domain)?;

        #[cfg(not(feature = "sqlite"))]
        let (created_at, updated_at) = (self.created_at, self.updated_at);

        #[cfg(feature = "sqlite")]
        let (created_at, updated_at) = (parse_timestamp(&self.created_at)?, parse_timestamp(&self.updated_at)?);

        Ok(Payment {
            id: PaymentId::new(self.id),
            order_id: OrderId::new(self.order_id),
            is_payed: self.is_payed,
            status,
            version: self.version,
            created_at,
            updated_at,
        })
    }
}

#[cfg(feature = "sqlite")]
fn parse_timestamp(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    Ok(chrono::DateTime::parse_from_rfc3339(raw)
        .map_err(|e| RepoError::Database(e.to_string()))?
        .with_timezone(&chrono::Utc))
}

/// Version-only row, used to tell a stale update from a missing row.
#[derive(FromRow)]
pub struct DbVersion {
    pub version: i64,
}

/// Builds the error for an update that matched no row.
pub fn stale_update(id: PaymentId, expected: i64, current: Option<DbVersion>) -> RepoError {
    match current {
        None => RepoError::NotFound,
        Some(row) => RepoError::Conflict(format!(
            "payment {} was modified concurrently (expected version {}, found {})",
            id, expected, row.version
        )),
    }
}
