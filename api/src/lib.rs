//! HTTP layer of the JobLane backend.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod state;
