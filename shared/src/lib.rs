//! # JobLane Shared
//!
//! Configuration structures, response types and validation helpers shared
//! across the JobLane backend crates.

pub mod config;
pub mod types;
pub mod utils;
