//! Two-phase registration: pending record first, durable account only
//! after email ownership is proven with an OTP.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::RegistrationService;
pub use types::{NewRegistration, RegistrationVerified};
