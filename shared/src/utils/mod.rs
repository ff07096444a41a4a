//! Shared utility helpers.

pub mod validation;
