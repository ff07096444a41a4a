//! Fire-and-forget OTP email dispatch.

use std::sync::Arc;

use jl_shared::utils::validation::mask_email;
use tokio::task::JoinHandle;

use super::traits::MailerTrait;

/// Which flow the code belongs to; only changes the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    AccountVerification,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::AccountVerification => "account verification",
            OtpPurpose::PasswordReset => "password reset",
        }
    }
}

/// Hand the raw code to the mailer on a separate task.
///
/// Called only after the issuing transaction has committed, so a slow or
/// failing provider never holds the row lock or blocks the response.
/// Failures are logged and not retried. The returned handle is for tests;
/// production callers drop it.
pub fn dispatch_code<M: MailerTrait + 'static>(
    mailer: Arc<M>,
    email: String,
    name: String,
    code: String,
    purpose: OtpPurpose,
    expiry_minutes: i64,
) -> JoinHandle<()> {
    let subject = format!("JobLane - Your OTP for {}", purpose.as_str());

    let text_body = format!(
        "Hello {name},\n\n\
         Your OTP for JobLane ({purpose}) is: {code}\n\
         It will expire in {expiry_minutes} minutes.\n\n\
         If you didn't request this, you can safely ignore this email.",
        purpose = purpose.as_str(),
    );

    let html_body = format!(
        "<p>Hello {name},</p>\
         <p>Your OTP for <strong>JobLane</strong> ({purpose}) is:</p>\
         <p style=\"font-size:28px;letter-spacing:6px\"><strong>{code}</strong></p>\
         <p>It will expire in {expiry_minutes} minutes. If you didn't request \
         this, you can safely ignore this email.</p>",
        purpose = purpose.as_str(),
    );

    tokio::spawn(async move {
        let delivered = mailer
            .send(&email, &name, &subject, &text_body, &html_body)
            .await;

        if delivered {
            tracing::info!(
                recipient = %mask_email(&email),
                purpose = purpose.as_str(),
                "OTP email dispatched"
            );
        } else {
            tracing::error!(
                recipient = %mask_email(&email),
                purpose = purpose.as_str(),
                "OTP email dispatch failed"
            );
        }
    })
}
