//! User API Library
//!
//! HTTP REST API for user sign-up, lookup, listing and deletion, plus the
//! command-line entry points that start it and manage the schema.

pub mod cli;
pub mod commands;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use routes::create_router;
pub use state::{AppState, HealthProbe};
