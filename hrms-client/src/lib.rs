//! HRMS Client - typed HTTP client for the HRMS backend
//!
//! Provides bearer-token authenticated REST calls and the salary
//! distribution workflow state machine used by the front-end.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod payslip;
pub mod session;
pub mod workflow;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use payslip::PayslipFile;
pub use session::Session;
pub use workflow::{SalaryWorkflow, WorkflowError, WorkflowState};

// Re-export shared types for convenience
pub use shared::api::{LoginRequest, LoginResponse};
pub use shared::models::{ChannelId, EmployeeSummary, SalaryCalculation};
