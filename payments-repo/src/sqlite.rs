//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::{DbPayment, DbVersion, PAYMENT_COLUMNS, stale_update};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn find_all(&self) -> Result<Vec<Payment>, RepoError> {
        let sql = format!("SELECT {} FROM payments ORDER BY id", PAYMENT_COLUMNS);
        let rows: Vec<DbPayment> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let sql = format!("SELECT {} FROM payments WHERE id = ?", PAYMENT_COLUMNS);
        let row: Option<DbPayment> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let result = sqlx::query(
            r#"INSERT INTO payments (order_id, is_payed, status, version, created_at, updated_at)
               VALUES (?, ?, ?, 0, ?, ?)"#,
        )
        .bind(payment.order_id.get())
        .bind(payment.is_payed)
        .bind(payment.status.as_str())
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Payment {
            id: PaymentId::new(result.last_insert_rowid()),
            order_id: payment.order_id,
            is_payed: payment.is_payed,
            status: payment.status,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, payment: &Payment) -> Result<Payment, RepoError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"UPDATE payments
               SET is_payed = ?, status = ?, version = version + 1, updated_at = ?
               WHERE id = ? AND version = ?"#,
        )
        .bind(payment.is_payed)
        .bind(payment.status.as_str())
        .bind(now.to_rfc3339())
        .bind(payment.id.get())
        .bind(payment.version)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            let current: Option<DbVersion> =
                sqlx::query_as(r#"SELECT version FROM payments WHERE id = ?"#)
                    .bind(payment.id.get())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| RepoError::Database(e.to_string()))?;

            return Err(stale_update(payment.id, payment.version, current));
        }

        Ok(Payment {
            version: payment.version + 1,
            updated_at: now,
            ..payment.clone()
        })
    }
}
