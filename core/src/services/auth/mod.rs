//! Credential login and password hashing.

pub mod password;
mod service;

pub use service::{AuthService, LoginOutcome};
