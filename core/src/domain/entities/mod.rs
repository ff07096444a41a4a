//! Domain entities for the JobLane backend.

pub mod account;
pub mod otp_challenge;
pub mod pending_registration;
pub mod profile;

pub use account::Account;
pub use otp_challenge::{OtpChallenge, VerificationSubject};
pub use pending_registration::PendingRegistration;
pub use profile::{AccountProfile, Role};
