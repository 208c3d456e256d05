//! Shared types for the HRMS front-end
//!
//! Domain models and API request/response types used by the client,
//! the console front-end and the mock backend.

pub mod api;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
