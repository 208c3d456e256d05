//! Data models
//!
//! Checked domain objects for every wire shape the backend exposes.
//! All entities are externally owned; the client only holds transient copies.

pub mod announcement;
pub mod attendance;
pub mod channel;
pub mod document;
pub mod employee;
pub mod salary;
pub mod sharing;

// Re-exports
pub use announcement::*;
pub use attendance::*;
pub use channel::*;
pub use document::*;
pub use employee::*;
pub use salary::*;
pub use sharing::*;
