//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::{DbPayment, DbVersion, PAYMENT_COLUMNS, stale_update};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository; concurrent writers are arbitrated by the version column.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for PostgresRepo {
    async fn find_all(&self) -> Result<Vec<Payment>, RepoError> {
        let sql = format!("SELECT {} FROM payments ORDER BY id", PAYMENT_COLUMNS);
        let rows: Vec<DbPayment> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let sql = format!("SELECT {} FROM payments WHERE id = $1", PAYMENT_COLUMNS);
        let row: Option<DbPayment> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let now = Utc::now();

        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO payments (order_id, is_payed, status, version, created_at, updated_at)
               VALUES ($1, $2, $3, 0, $4, $4)
               RETURNING id"#,
        )
        .bind(payment.order_id.get())
        .bind(payment.is_payed)
        .bind(payment.status.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Payment {
            id: PaymentId::new(id),
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
               SET is_payed = $1, status = $2, version = version + 1, updated_at = $3
               WHERE id = $4 AND version = $5"#,
        )
        .bind(payment.is_payed)
        .bind(payment.status.as_str())
        .bind(now)
        .bind(payment.id.get())
        .bind(payment.version)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            let current: Option<DbVersion> =
                sqlx::query_as(r#"SELECT version FROM payments WHERE id = $1"#)
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
