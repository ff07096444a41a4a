//! MySQL implementation of the PendingRegistrationRepository trait.
//!
//! The pending_registrations table is keyed by email. The `with_locked`
//! combinator runs the caller's closure between a `SELECT ... FOR
//! UPDATE` and the write-back, so challenge counters are read and
//! updated under an exclusive row lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use jl_core::domain::entities::{PendingRegistration, Role};
use jl_core::errors::DomainError;
use jl_core::repositories::PendingRegistrationRepository;

use super::row::{db_err, pending_from_row};

const SELECT_COLUMNS: &str = "email, username, name, role, password_hash, otp_digest, \
     otp_issued_at, otp_attempts, last_sent_at, resend_count, created_at, updated_at";

pub struct MySqlPendingRegistrationRepository {
    pool: MySqlPool,
}

impl MySqlPendingRegistrationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PendingRegistrationRepository for MySqlPendingRegistrationRepository {
    async fn upsert(
        &self,
        email: &str,
        username: &str,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<PendingRegistration, DomainError> {
        // Challenge columns keep their values on re-submission; only the
        // identity fields take the last write.
        let query = r#"
            INSERT INTO pending_registrations (
                email, username, name, role, password_hash,
                otp_digest, otp_issued_at, otp_attempts, last_sent_at, resend_count,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, NULL, NULL, 0, NULL, 0, ?, ?)
            ON DUPLICATE KEY UPDATE
                username = VALUES(username),
                name = VALUES(name),
                role = VALUES(role),
                password_hash = VALUES(password_hash),
                updated_at = VALUES(updated_at)
        "#;

        let now = Utc::now();
        sqlx::query(query)
            .bind(email)
            .bind(username)
            .bind(name)
            .bind(role.as_str())
            .bind(password_hash)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        self.find_by_email(email).await?.ok_or(DomainError::Database {
            message: "pending registration vanished after upsert".to_string(),
        })
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, DomainError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM pending_registrations WHERE email = ? LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(pending_from_row).transpose()
    }

    async fn with_locked<R, F>(&self, email: &str, f: F) -> Result<Option<R>, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&mut PendingRegistration) -> R + Send + 'static,
    {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM pending_registrations WHERE email = ? FOR UPDATE"
        );
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(db_err)?;
            return Ok(None);
        };
        let mut pending = pending_from_row(&row)?;

        let result = f(&mut pending);

        let update = r#"
            UPDATE pending_registrations SET
                username = ?, name = ?, role = ?, password_hash = ?,
                otp_digest = ?, otp_issued_at = ?, otp_attempts = ?,
                last_sent_at = ?, resend_count = ?, updated_at = ?
            WHERE email = ?
        "#;
        sqlx::query(update)
            .bind(&pending.username)
            .bind(&pending.name)
            .bind(pending.role.as_str())
            .bind(&pending.password_hash)
            .bind(&pending.challenge.otp_digest)
            .bind(pending.challenge.otp_issued_at)
            .bind(pending.challenge.otp_attempts)
            .bind(pending.challenge.last_sent_at)
            .bind(pending.challenge.resend_count)
            .bind(Utc::now())
            .bind(email)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(Some(result))
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM pending_registrations WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_stale(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM pending_registrations WHERE updated_at < ?")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }
}
