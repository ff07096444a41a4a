//! Credential recovery: forgot-password OTP, reset token, overwrite.

mod service;

#[cfg(test)]
mod tests;

pub use service::PasswordResetService;
