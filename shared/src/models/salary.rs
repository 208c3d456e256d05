//! Salary Calculation Model
//!
//! Computed, non-persisted view object returned by the backend for a
//! `(employee_id, year, month)` triple. The client never recomputes any of
//! these figures; the arithmetic invariants
//! (`gross_salary = sum of earnings`, `net_salary = gross - total_deductions`)
//! are produced server-side and asserted by contract tests.

use serde::{Deserialize, Serialize};

/// Identity block attached to a calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub designation: String,
    /// Human-readable period, e.g. "March 2025"
    pub calculation_month: String,
}

/// Attendance figures the calculation was based on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceDetails {
    pub present_days: u32,
    pub total_working_days: u32,
    pub attendance_percentage: f64,
}

/// Earnings side of the breakdown, all pro-rated by attendance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Earnings {
    pub basic_salary: f64,
    pub hra: f64,
    pub da: f64,
    pub medical_allowance: f64,
    pub transport_allowance: f64,
    #[serde(default)]
    pub special_allowance: f64,
    pub gross_salary: f64,
}

impl Earnings {
    /// Sum of the constituent earning fields, excluding `gross_salary` itself
    pub fn component_total(&self) -> f64 {
        self.basic_salary
            + self.hra
            + self.da
            + self.medical_allowance
            + self.transport_allowance
            + self.special_allowance
    }
}

/// Statutory deductions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deductions {
    pub pf_employee: f64,
    pub pf_employer: f64,
    pub esi_employee: f64,
    pub esi_employer: f64,
    pub professional_tax: f64,
    pub income_tax: f64,
    pub total_deductions: f64,
}

/// Employer-side contributions (informational, not deducted from net)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerContributions {
    pub pf_employer: f64,
    pub esi_employer: f64,
    pub total_employer_contribution: f64,
}

/// Complete monthly salary breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryCalculation {
    pub employee_info: EmployeeInfo,
    pub employee_details: AttendanceDetails,
    pub earnings: Earnings,
    pub deductions: Deductions,
    pub net_salary: f64,
    pub employer_contributions: EmployerContributions,
}
