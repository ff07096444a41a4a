//! Pending-registration repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{PendingRegistration, Role};
use crate::errors::DomainError;

/// Persistence operations for provisional registration records.
#[async_trait]
pub trait PendingRegistrationRepository: Send + Sync {
    /// Create the record for `email`, or overwrite its identity fields
    /// if one already exists (last write wins; challenge state is kept).
    async fn upsert(
        &self,
        email: &str,
        username: &str,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<PendingRegistration, DomainError>;

    /// Plain lookup without locking.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, DomainError>;

    /// Run `f` on the record while its row is exclusively locked, then
    /// persist the mutated record. Returns `None` when no record exists.
    ///
    /// The lock is released before this method returns; anything that
    /// must happen outside the critical section (dispatch, promotion)
    /// belongs after the call.
    async fn with_locked<R, F>(&self, email: &str, f: F) -> Result<Option<R>, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&mut PendingRegistration) -> R + Send + 'static;

    /// Remove the record. Returns `false` when nothing was deleted.
    async fn delete(&self, email: &str) -> Result<bool, DomainError>;

    /// Delete records not touched since `before`. Retention policy is an
    /// operator decision; this is the hook for a cleanup cron.
    async fn purge_stale(&self, before: DateTime<Utc>) -> Result<u64, DomainError>;
}
