//! Password reset orchestration.

use std::sync::Arc;

use jl_shared::config::OtpConfig;
use jl_shared::utils::validation::{is_valid_password, mask_email};
use tracing::{info, instrument};

use crate::domain::clock::Clock;
use crate::errors::{AuthError, DomainError, DomainResult, OtpError, TokenError};
use crate::repositories::AccountRepository;
use crate::services::otp::{self, MailerTrait, OtpPurpose};
use crate::services::auth::password::hash_password;
use crate::services::reset_token::ResetTokenCodec;

pub struct PasswordResetService<A, M>
where
    A: AccountRepository,
    M: MailerTrait + 'static,
{
    account_repo: Arc<A>,
    mailer: Arc<M>,
    codec: ResetTokenCodec,
    clock: Arc<dyn Clock>,
    config: OtpConfig,
}

impl<A, M> PasswordResetService<A, M>
where
    A: AccountRepository,
    M: MailerTrait + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        mailer: Arc<M>,
        codec: ResetTokenCodec,
        clock: Arc<dyn Clock>,
        config: OtpConfig,
    ) -> Self {
        Self {
            account_repo,
            mailer,
            codec,
            clock,
            config,
        }
    }

    /// Send a reset code if the email belongs to an account.
    ///
    /// An unknown email gets the same success outcome as a known one,
    /// with nothing stored and nothing sent, so this endpoint cannot be
    /// used to probe which addresses are registered. Rate-limit
    /// rejections still surface: they only occur for known addresses the
    /// caller has already proven able to trigger sends for.
    #[instrument(skip(self), fields(email = %mask_email(email)))]
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        if self.account_repo.find_by_email(email).await?.is_none() {
            info!("reset requested for unknown email, returning success");
            return Ok(());
        }

        let now = self.clock.now();
        let config = self.config.clone();
        let outcome = self
            .account_repo
            .with_locked_profile(email, move |profile| {
                otp::issue_challenge(profile, now, &config)
                    .map(|code| (code, profile.name.clone()))
            })
            .await?;
        let Some(issued) = outcome else {
            // Account without a profile row; treat like unknown
            info!("reset requested for account without profile, returning success");
            return Ok(());
        };
        let (code, name) = issued?;

        let _ = otp::dispatch_code(
            Arc::clone(&self.mailer),
            email.to_string(),
            name,
            code,
            OtpPurpose::PasswordReset,
            self.config.otp_expiry_minutes,
        );
        Ok(())
    }

    /// Verify the reset code and mint a short-lived reset token.
    #[instrument(skip(self, code), fields(email = %mask_email(email)))]
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<String> {
        let now = self.clock.now();
        let config = self.config.clone();
        let submitted = code.to_string();

        let outcome = self
            .account_repo
            .with_locked_profile(email, move |profile| {
                otp::verify_challenge(profile, &submitted, now, &config)
            })
            .await?;
        // Unknown emails look exactly like ones that never requested a
        // code.
        let Some(result) = outcome else {
            return Err(OtpError::NotRequested.into());
        };
        result?;

        let token = self.codec.issue(email, now)?;
        info!("reset code verified, reset token issued");
        Ok(token)
    }

    /// Redeem the reset token and overwrite the account credential.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> DomainResult<()> {
        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        if !is_valid_password(new_password) {
            return Err(DomainError::Validation {
                message: "password must be at least 8 characters".to_string(),
            });
        }

        let email = self.codec.redeem(token, self.clock.now())?;
        let password_hash = hash_password(new_password)?;

        let updated = self.account_repo.reset_credential(&email, &password_hash).await?;
        if !updated {
            // Account deleted between verification and reset
            return Err(TokenError::Invalid.into());
        }

        info!(email = %mask_email(&email), "password reset completed");
        Ok(())
    }
}
