//! Business services for the JobLane backend.

pub mod auth;
pub mod otp;
pub mod password_reset;
pub mod registration;
pub mod reset_token;
pub mod token;
