//! Mock implementation of AccountRepository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, AccountProfile, PendingRegistration};
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

#[derive(Default)]
struct Store {
    accounts: HashMap<String, Account>,
    profiles: HashMap<String, AccountProfile>,
}

/// In-memory account repository. A single lock over both maps mirrors
/// the transactional promotion of the MySQL implementation.
#[derive(Default)]
pub struct MockAccountRepository {
    store: Arc<RwLock<Store>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account and its profile directly.
    pub async fn insert(&self, account: Account, profile: AccountProfile) {
        let mut store = self.store.write().await;
        store.profiles.insert(account.email.clone(), profile);
        store.accounts.insert(account.email.clone(), account);
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.store.read().await.accounts.get(email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.store.read().await.accounts.contains_key(email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let store = self.store.read().await;
        Ok(store.accounts.values().any(|a| a.username == username))
    }

    async fn find_profile_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountProfile>, DomainError> {
        Ok(self.store.read().await.profiles.get(email).cloned())
    }

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<AccountProfile>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .profiles
            .values()
            .find(|p| p.account_id == account_id)
            .cloned())
    }

    async fn promote_pending(
        &self,
        pending: &PendingRegistration,
    ) -> Result<Account, DomainError> {
        let mut store = self.store.write().await;

        if store
            .accounts
            .values()
            .any(|a| a.username == pending.username)
        {
            return Err(AuthError::UsernameTaken.into());
        }
        if store.accounts.contains_key(&pending.email) {
            return Err(AuthError::EmailTaken.into());
        }

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

        store.profiles.insert(account.email.clone(), profile);
        store.accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn with_locked_profile<R, F>(&self, email: &str, f: F) -> Result<Option<R>, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&mut AccountProfile) -> R + Send + 'static,
    {
        let mut store = self.store.write().await;
        Ok(store.profiles.get_mut(email).map(f))
    }

    async fn reset_credential(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let Some(account) = store.accounts.get_mut(email) else {
            return Ok(false);
        };
        account.set_password_hash(password_hash.to_string());
        if let Some(profile) = store.profiles.get_mut(email) {
            profile.challenge.clear_all();
        }
        Ok(true)
    }
}
