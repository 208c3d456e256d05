//! HRMS terminal front-end
//!
//! Single-threaded ratatui event loop. Network calls are spawned onto the
//! tokio runtime and complete by sending an [`app::AppMessage`] back into the
//! loop; the app state itself is synchronous and fully testable without a
//! terminal or a server.

pub mod app;
pub mod config;
pub mod logger;
pub mod net;
pub mod ui;

pub use app::{App, AppMessage, Command, Screen};
pub use config::ConsoleConfig;
