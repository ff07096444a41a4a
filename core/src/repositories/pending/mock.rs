//! Mock implementation of PendingRegistrationRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{PendingRegistration, Role};
use crate::errors::DomainError;

use super::trait_::PendingRegistrationRepository;

/// In-memory pending-registration repository. The write lock on the map
/// stands in for the row-level lock of the MySQL implementation.
#[derive(Default)]
pub struct MockPendingRegistrationRepository {
    records: Arc<RwLock<HashMap<String, PendingRegistration>>>,
}

impl MockPendingRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing upsert.
    pub async fn insert(&self, pending: PendingRegistration) {
        self.records
            .write()
            .await
            .insert(pending.email.clone(), pending);
    }
}

#[async_trait]
impl PendingRegistrationRepository for MockPendingRegistrationRepository {
    async fn upsert(
        &self,
        email: &str,
        username: &str,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<PendingRegistration, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(email.to_string())
            .and_modify(|existing| {
                existing.overwrite_identity(
                    username.to_string(),
                    name.to_string(),
                    role,
                    password_hash.to_string(),
                );
            })
            .or_insert_with(|| {
                PendingRegistration::new(
                    email.to_string(),
                    username.to_string(),
                    name.to_string(),
                    role,
                    password_hash.to_string(),
                )
            });
        Ok(record.clone())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, DomainError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn with_locked<R, F>(&self, email: &str, f: F) -> Result<Option<R>, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&mut PendingRegistration) -> R + Send + 'static,
    {
        let mut records = self.records.write().await;
        Ok(records.get_mut(email).map(f))
    }

    async fn delete(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(email).is_some())
    }

    async fn purge_stale(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let initial = records.len();
        records.retain(|_, r| r.updated_at >= before);
        Ok((initial - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_overwrites_identity_keeps_challenge() {
        let repo = MockPendingRegistrationRepository::new();
        repo.upsert("a@example.com", "first", "First", Role::JobSeeker, "hash1")
            .await
            .unwrap();

        repo.with_locked("a@example.com", |p| {
            p.challenge.record_issuance("digest".to_string(), Utc::now());
        })
        .await
        .unwrap();

        let updated = repo
            .upsert("a@example.com", "second", "Second", Role::Recruiter, "hash2")
            .await
            .unwrap();

        assert_eq!(updated.username, "second");
        assert_eq!(updated.challenge.resend_count, 1);
    }

    #[tokio::test]
    async fn test_with_locked_missing_record_is_none() {
        let repo = MockPendingRegistrationRepository::new();
        let result = repo.with_locked("nobody@example.com", |_| ()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_purge_stale() {
        let repo = MockPendingRegistrationRepository::new();
        repo.upsert("a@example.com", "a", "A", Role::JobSeeker, "h")
            .await
            .unwrap();

        let purged = repo
            .purge_stale(Utc::now() + chrono::Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(purged, 1);
        assert!(repo.find_by_email("a@example.com").await.unwrap().is_none());
    }
}
