//! Attendance Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geolocation captured at clock-in/out.
///
/// Acquisition is a one-shot call on the front-end side; a missing location
/// (denied permission) disables the attendance action instead of retrying.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

/// Attendance status, the only client-visible state machine on this entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "Logged In")]
    LoggedIn,
    #[serde(rename = "Logged Out")]
    LoggedOut,
}

/// One attendance record per employee per day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub login_time: DateTime<Utc>,
    pub logout_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub login_location: GeoLocation,
    #[serde(default)]
    pub logout_location: GeoLocation,
    /// Calendar date in `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub total_hours: f64,
    pub status: AttendanceStatus,
}
