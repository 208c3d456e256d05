//! Employee Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Full employee record as returned by `/api/employees`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    /// External employee code (e.g. "E100"), unique
    pub employee_id: String,
    pub full_name: String,
    pub department: String,
    pub designation: String,
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub manager: String,
    pub contact_number: String,
    pub email_address: String,
    pub address: String,
    /// Monthly basic salary before allowances and deductions
    pub basic_salary: f64,
    pub status: EmployeeStatus,
    pub username: String,
}

/// Subset of the employee record used by the salary workflow selection list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_id: String,
    pub full_name: String,
    pub department: String,
    pub designation: String,
    pub email_address: String,
    pub contact_number: String,
    pub basic_salary: f64,
    pub status: EmployeeStatus,
}

impl From<&EmployeeRecord> for EmployeeSummary {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            full_name: record.full_name.clone(),
            department: record.department.clone(),
            designation: record.designation.clone(),
            email_address: record.email_address.clone(),
            contact_number: record.contact_number.clone(),
            basic_salary: record.basic_salary,
            status: record.status,
        }
    }
}
