//! Shared response and common types.

pub mod response;
