//! Posts GraphQL service
//! Re-exports modules for the binary and for integration tests

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod service;
pub mod store;
pub mod telemetry;
