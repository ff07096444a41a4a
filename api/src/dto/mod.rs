//! Request and response payloads.

pub mod auth;
