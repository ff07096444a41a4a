//! Inputs and outputs of the registration service.

use crate::domain::entities::{Account, Role};
use crate::services::token::AuthTokens;

/// Validated registration submission.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub password: String,
}

/// Outcome of a successful OTP verification: the freshly promoted
/// account, signed in.
#[derive(Debug)]
pub struct RegistrationVerified {
    pub account: Account,
    pub role: Role,
    pub tokens: AuthTokens,
}
