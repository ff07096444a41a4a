//! Configuration structures for the JobLane backend.
//!
//! Each sub-module holds one concern; everything can be constructed from
//! environment variables via `from_env` for the api binary, or built
//! directly in tests.

mod auth;
mod database;
mod email;
mod otp;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use otp::OtpConfig;
pub use server::ServerConfig;
