//! Registration orchestration.

use std::sync::Arc;

use jl_shared::config::OtpConfig;
use jl_shared::utils::validation::{
    is_valid_email, is_valid_password, is_valid_username, mask_email,
};
use tracing::{info, instrument};

use crate::domain::clock::Clock;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, PendingRegistrationRepository};
use crate::services::auth::password::hash_password;
use crate::services::otp::{self, MailerTrait, OtpPurpose};
use crate::services::token::AuthTokenService;

use super::types::{NewRegistration, RegistrationVerified};

pub struct RegistrationService<P, A, M>
where
    P: PendingRegistrationRepository,
    A: AccountRepository,
    M: MailerTrait + 'static,
{
    pending_repo: Arc<P>,
    account_repo: Arc<A>,
    mailer: Arc<M>,
    tokens: Arc<AuthTokenService>,
    clock: Arc<dyn Clock>,
    config: OtpConfig,
}

impl<P, A, M> RegistrationService<P, A, M>
where
    P: PendingRegistrationRepository,
    A: AccountRepository,
    M: MailerTrait + 'static,
{
    pub fn new(
        pending_repo: Arc<P>,
        account_repo: Arc<A>,
        mailer: Arc<M>,
        tokens: Arc<AuthTokenService>,
        clock: Arc<dyn Clock>,
        config: OtpConfig,
    ) -> Self {
        Self {
            pending_repo,
            account_repo,
            mailer,
            tokens,
            clock,
            config,
        }
    }

    /// Record a registration submission and send the first OTP.
    ///
    /// Resubmitting the same email before verification overwrites the
    /// identity fields of the pending record but keeps its challenge
    /// counters, so resubmission is not a rate-limit bypass.
    #[instrument(skip(self, registration), fields(email = %mask_email(&registration.email)))]
    pub async fn register(&self, registration: NewRegistration) -> DomainResult<()> {
        Self::validate(&registration)?;

        if self
            .account_repo
            .exists_by_username(&registration.username)
            .await?
        {
            return Err(AuthError::UsernameTaken.into());
        }
        if self.account_repo.exists_by_email(&registration.email).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = hash_password(&registration.password)?;
        self.pending_repo
            .upsert(
                &registration.email,
                &registration.username,
                &registration.name,
                registration.role,
                &password_hash,
            )
            .await?;

        self.issue_and_dispatch(&registration.email).await?;
        info!("registration recorded, verification code sent");
        Ok(())
    }

    /// Re-send a verification code for an existing pending registration.
    #[instrument(skip(self), fields(email = %mask_email(email)))]
    pub async fn resend_otp(&self, email: &str) -> DomainResult<()> {
        self.issue_and_dispatch(email).await
    }

    /// Verify the submitted code and promote the pending registration
    /// into a durable, verified account.
    #[instrument(skip(self, code), fields(email = %mask_email(email)))]
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<RegistrationVerified> {
        let now = self.clock.now();
        let config = self.config.clone();
        let submitted = code.to_string();

        let outcome = self
            .pending_repo
            .with_locked(email, move |pending| {
                otp::verify_challenge(pending, &submitted, now, &config).map(|()| pending.clone())
            })
            .await?;
        let Some(verified) = outcome else {
            return Err(AuthError::UserNotFound.into());
        };
        let pending = verified?;

        // Friendly pre-checks; the promotion transaction is the real
        // arbiter under concurrency.
        if self
            .account_repo
            .exists_by_username(&pending.username)
            .await?
        {
            return Err(AuthError::UsernameTaken.into());
        }
        if self.account_repo.exists_by_email(&pending.email).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let account = self.account_repo.promote_pending(&pending).await?;
        self.pending_repo.delete(email).await?;

        let tokens = self.tokens.generate_pair(account.id, pending.role)?;
        info!(account_id = %account.id, "registration verified, account promoted");

        Ok(RegistrationVerified {
            account,
            role: pending.role,
            tokens,
        })
    }

    /// Issue a code under the pending row lock, then dispatch it after
    /// the lock is released.
    async fn issue_and_dispatch(&self, email: &str) -> DomainResult<()> {
        let now = self.clock.now();
        let config = self.config.clone();

        let outcome = self
            .pending_repo
            .with_locked(email, move |pending| {
                otp::issue_challenge(pending, now, &config)
                    .map(|code| (code, pending.name.clone()))
            })
            .await?;
        let Some(issued) = outcome else {
            return Err(AuthError::UserNotFound.into());
        };
        let (code, name) = issued?;

        let _ = otp::dispatch_code(
            Arc::clone(&self.mailer),
            email.to_string(),
            name,
            code,
            OtpPurpose::AccountVerification,
            self.config.otp_expiry_minutes,
        );
        Ok(())
    }

    fn validate(registration: &NewRegistration) -> DomainResult<()> {
        if !is_valid_email(&registration.email) {
            return Err(DomainError::Validation {
                message: "invalid email address".to_string(),
            });
        }
        if !is_valid_username(&registration.username) {
            return Err(DomainError::Validation {
                message: "username must be 3-30 characters (letters, digits, underscore)"
                    .to_string(),
            });
        }
        if !is_valid_password(&registration.password) {
            return Err(DomainError::Validation {
                message: "password must be at least 8 characters".to_string(),
            });
        }
        if registration.name.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
