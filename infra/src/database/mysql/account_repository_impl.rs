//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts and their profiles live in two tables joined on the account
//! id; profile lookups always join back to the account so the entity
//! carries the recipient email. Promotion inserts both rows in one
//! transaction and relies on the unique keys on username and email to
//! arbitrate races.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use jl_core::domain::entities::{Account, AccountProfile, PendingRegistration};
use jl_core::errors::{AuthError, DomainError};
use jl_core::repositories::AccountRepository;

use super::row::{account_from_row, db_err, profile_from_row};

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

const PROFILE_COLUMNS: &str = "p.account_id, p.name, p.role, p.phone, p.location, \
     p.is_verified, p.otp_digest, p.otp_issued_at, p.otp_attempts, p.last_sent_at, \
     p.resend_count, p.updated_at, a.email";

pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Map a duplicate-key violation to the conflicting identity field.
fn map_duplicate_key(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some("23000") {
            let message = db.message();
            if message.contains("username") {
                return AuthError::UsernameTaken.into();
            }
            if message.contains("email") {
                return AuthError::EmailTaken.into();
            }
        }
    }
    db_err(e)
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.0 > 0)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.0 > 0)
    }

    async fn find_profile_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountProfile>, DomainError> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM account_profiles p \
             JOIN accounts a ON p.account_id = a.id WHERE a.email = ? LIMIT 1"
        );
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(profile_from_row).transpose()
    }

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<AccountProfile>, DomainError> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM account_profiles p \
             JOIN accounts a ON p.account_id = a.id WHERE p.account_id = ? LIMIT 1"
        );
        let row = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(profile_from_row).transpose()
    }

    async fn promote_pending(
        &self,
        pending: &PendingRegistration,
    ) -> Result<Account, DomainError> {
        let account = Account::new(
            pending.username.clone(),
            pending.email.clone(),
            pending.password_hash.clone(),
        );
        let profile = AccountProfile::new(
            account.id,
            account.email.clone(),
            pending.name.clone(),
            pending.role,
        );

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO accounts (id, username, email, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(account.id.to_string())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_duplicate_key)?;

        sqlx::query(
            "INSERT INTO account_profiles ( \
                account_id, name, role, phone, location, is_verified, \
                otp_digest, otp_issued_at, otp_attempts, last_sent_at, resend_count, \
                updated_at \
             ) VALUES (?, ?, ?, NULL, NULL, TRUE, NULL, NULL, 0, NULL, 0, ?)",
        )
        .bind(profile.account_id.to_string())
        .bind(&profile.name)
        .bind(profile.role.as_str())
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(account)
    }

    async fn with_locked_profile<R, F>(&self, email: &str, f: F) -> Result<Option<R>, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&mut AccountProfile) -> R + Send + 'static,
    {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM account_profiles p \
             JOIN accounts a ON p.account_id = a.id WHERE a.email = ? FOR UPDATE"
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
        let mut profile = profile_from_row(&row)?;

        let result = f(&mut profile);

        sqlx::query(
            "UPDATE account_profiles SET \
                otp_digest = ?, otp_issued_at = ?, otp_attempts = ?, \
                last_sent_at = ?, resend_count = ?, updated_at = ? \
             WHERE account_id = ?",
        )
        .bind(&profile.challenge.otp_digest)
        .bind(profile.challenge.otp_issued_at)
        .bind(profile.challenge.otp_attempts)
        .bind(profile.challenge.last_sent_at)
        .bind(profile.challenge.resend_count)
        .bind(Utc::now())
        .bind(profile.account_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(Some(result))
    }

    async fn reset_credential(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let updated = sqlx::query(
            "UPDATE accounts SET password_hash = ?, updated_at = ? WHERE email = ?",
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(db_err)?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE account_profiles p JOIN accounts a ON p.account_id = a.id SET \
                p.otp_digest = NULL, p.otp_issued_at = NULL, p.otp_attempts = 0, \
                p.last_sent_at = NULL, p.resend_count = 0, p.updated_at = ? \
             WHERE a.email = ?",
        )
        .bind(Utc::now())
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(true)
    }
}
