//! Account repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Account, AccountProfile, PendingRegistration};
use crate::errors::DomainError;

/// Persistence operations for durable accounts and their profiles.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    async fn find_profile_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountProfile>, DomainError>;

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<AccountProfile>, DomainError>;

    /// Promote a verified pending registration into a durable account
    /// with a verified profile, both inserted in one transaction. The
    /// caller removes the pending record once this returns; a leftover
    /// pending row is harmless and expires with the stale purge. A
    /// concurrent insert of the same username or email surfaces as
    /// `AuthError::UsernameTaken`/`EmailTaken`.
    async fn promote_pending(
        &self,
        pending: &PendingRegistration,
    ) -> Result<Account, DomainError>;

    /// Run `f` on the profile while its row is exclusively locked, then
    /// persist the mutated profile. Returns `None` when no account with
    /// that email exists.
    async fn with_locked_profile<R, F>(&self, email: &str, f: F) -> Result<Option<R>, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&mut AccountProfile) -> R + Send + 'static;

    /// Overwrite the password credential and clear every challenge field
    /// on the profile in one transaction. Returns `false` when no
    /// account with that email exists.
    async fn reset_credential(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;
}
