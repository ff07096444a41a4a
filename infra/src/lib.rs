//! Infrastructure layer for the JobLane backend.
//!
//! Concrete implementations of the persistence and messaging seams
//! defined in `jl_core`: MySQL repositories over SQLx and the Brevo
//! transactional email client.

pub mod database;
pub mod email;

pub use database::DatabasePool;
pub use email::{create_mailer, Mailer};

/// Errors raised while constructing infrastructure components.
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
