//! Tests for the OTP subsystem.

mod dispatch_tests;
mod support;
