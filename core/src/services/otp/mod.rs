//! OTP verification subsystem.
//!
//! This module provides the complete one-time-code workflow:
//! - code generation and one-way digests
//! - rate-limited issuance (cooldown, daily cap) over any
//!   [`crate::domain::entities::VerificationSubject`]
//! - verification with attempt tracking and constant-time comparison
//! - fire-and-forget email dispatch
//!
//! The functions here are pure state transitions over a subject's
//! challenge fields; callers run them inside the repository's row-lock
//! seam and dispatch only after the lock is released.

mod dispatch;
mod generator;
mod issuance;
mod traits;
mod verify;

#[cfg(test)]
mod tests;

pub use dispatch::{dispatch_code, OtpPurpose};
pub use generator::{digest, generate_code};
pub use issuance::issue_challenge;
pub use traits::MailerTrait;
pub use verify::verify_challenge;
