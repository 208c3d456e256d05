//! In-memory HRMS backend for development and integration tests
//!
//! Serves the full REST surface the client consumes, backed by seeded
//! fixtures instead of a database. Deterministic by construction: the same
//! request always produces the same figures and delivery outcomes.

pub mod api;
pub mod fixtures;
pub mod salary;
pub mod sharing;
pub mod state;

pub use api::router;
pub use state::AppState;
