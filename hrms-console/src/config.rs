//! Console configuration from environment variables

use std::path::PathBuf;

/// Runtime configuration for the console binary.
/// `.env` loading happens in `main` before this is read.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL
    pub server_url: String,
    /// Directory for rotating log files
    pub log_dir: PathBuf,
    /// Directory payslip downloads are saved into
    pub download_dir: PathBuf,
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var("HRMS_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            log_dir: std::env::var("HRMS_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./logs")),
            download_dir: std::env::var("HRMS_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            log_dir: PathBuf::from("./logs"),
            download_dir: PathBuf::from("."),
        }
    }
}
