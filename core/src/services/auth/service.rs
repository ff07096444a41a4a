//! Username/email + password login.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::entities::{Account, Role};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::token::{AuthTokenService, AuthTokens};

use super::password::verify_password;

/// A signed-in account.
#[derive(Debug)]
pub struct LoginOutcome {
    pub account: Account,
    pub role: Role,
    pub tokens: AuthTokens,
}

pub struct AuthService<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    tokens: Arc<AuthTokenService>,
}

impl<A> AuthService<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, tokens: Arc<AuthTokenService>) -> Self {
        Self {
            account_repo,
            tokens,
        }
    }

    /// Authenticate by username or email.
    ///
    /// Every failure path collapses to `InvalidCredentials`: the caller
    /// learns nothing about whether the identifier exists.
    #[instrument(skip_all)]
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<LoginOutcome> {
        let account = if identifier.contains('@') {
            self.account_repo.find_by_email(identifier).await?
        } else {
            self.account_repo.find_by_username(identifier).await?
        };
        let Some(account) = account else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let profile = self
            .account_repo
            .find_profile_by_account(account.id)
            .await?;
        let Some(profile) = profile else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let tokens = self.tokens.generate_pair(account.id, profile.role)?;
        info!(account_id = %account.id, "login succeeded");

        Ok(LoginOutcome {
            account,
            role: profile.role,
            tokens,
        })
    }
}
