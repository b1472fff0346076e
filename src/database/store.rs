use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Account, AdminSummary, Announcement};

/// The single-data-operation boundary of every handler. Each method is one
/// atomic read or row update; handlers never compose two calls into a
/// transaction at this layer.
#[async_trait]
pub trait Store: Send + Sync {
    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError>;

    /// Reset the failed-attempt counter and clear the restriction flag.
    /// Idempotent; `NotFound` when no such account exists.
    async fn unlock_account(&self, id: Uuid) -> Result<Account, DatabaseError>;

    /// Bump the failed-attempt counter, restricting the account once the
    /// counter reaches `max_failed`. Restriction is sticky.
    async fn record_failed_login(&self, id: Uuid, max_failed: i32) -> Result<Account, DatabaseError>;

    /// Reset the failed-attempt counter after a successful login. Leaves the
    /// restriction flag alone; only an admin unlock clears that.
    async fn clear_failed_logins(&self, id: Uuid) -> Result<Account, DatabaseError>;

    /// The most recently updated announcement that is active and unexpired,
    /// or `None` when nothing is live.
    async fn active_announcement(&self) -> Result<Option<Announcement>, DatabaseError>;

    /// `{ id, email, name }` projection of all admin accounts.
    async fn list_admins(&self) -> Result<Vec<AdminSummary>, DatabaseError>;
}

const ACCOUNT_COLUMNS: &str =
    "id, email, name, password_hash, role, restricted, failed_attempts, created_at, updated_at";

/// Postgres-backed store used by the running server.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let query = format!("SELECT {} FROM accounts WHERE email = $1", ACCOUNT_COLUMNS);
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn unlock_account(&self, id: Uuid) -> Result<Account, DatabaseError> {
        let query = format!(
            r#"
            UPDATE accounts
            SET failed_attempts = 0, restricted = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("account {} not found", id)))
    }

    async fn record_failed_login(&self, id: Uuid, max_failed: i32) -> Result<Account, DatabaseError> {
        let query = format!(
            r#"
            UPDATE accounts
            SET failed_attempts = failed_attempts + 1,
                restricted = restricted OR failed_attempts + 1 >= $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(max_failed)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("account {} not found", id)))
    }

    async fn clear_failed_logins(&self, id: Uuid) -> Result<Account, DatabaseError> {
        let query = format!(
            r#"
            UPDATE accounts
            SET failed_attempts = 0, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("account {} not found", id)))
    }

    async fn active_announcement(&self) -> Result<Option<Announcement>, DatabaseError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT id, title, body, active, expires_at, created_at, updated_at
            FROM announcements
            WHERE active AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(announcement)
    }

    async fn list_admins(&self) -> Result<Vec<AdminSummary>, DatabaseError> {
        let admins = sqlx::query_as::<_, AdminSummary>(
            "SELECT id, email, name FROM accounts WHERE role = 'ADMIN' ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }
}
