//! Salary distribution workflow
//!
//! Explicit state machine for the calculate → payslip → multi-channel share
//! flow. Transitions are plain functions so the allowed moves are enumerable
//! and testable; the async network calls themselves happen outside and feed
//! their results back in.
//!
//! ```text
//! Idle → EmployeeSelected → Calculating → Calculated → (Downloading | Sharing) → Calculated
//! ```
//!
//! Failures return to the prior stable state carrying a transient
//! notification; nothing about a failure is persisted.
//!
//! There is no request cancellation: a calculation issued before switching
//! employees may still complete later. Each issued calculation therefore
//! carries a monotonically increasing ticket, and a response is applied only
//! when its ticket is still the current one and the employee still matches.

mod channels;
#[cfg(test)]
mod tests;

pub use channels::ChannelSelection;

use shared::api::{
    ChannelCatalogResponse, SalaryCalculationRequest, ShareSalarySlipRequest,
    ShareSalarySlipResponse,
};
use shared::models::{CommunicationChannel, EmployeeSummary, SalaryCalculation};
use thiserror::Error;

/// Years the period picker offers
pub const ALLOWED_YEARS: [i32; 3] = [2024, 2025, 2026];

/// Transition errors; surfaced as transient notifications, never stored
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Please select an employee")]
    NoEmployeeSelected,

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Please calculate the salary first")]
    NotCalculated,

    #[error("Please select at least one communication channel")]
    NoChannelsSelected,

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("Invalid period: {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },
}

/// Workflow state; `Calculating` carries the ticket of the in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    EmployeeSelected,
    Calculating { ticket: u64 },
    Calculated,
    Downloading,
    Sharing,
}

impl WorkflowState {
    /// True while a request is in flight and the triggering control must be
    /// disabled to prevent duplicate submissions
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WorkflowState::Calculating { .. } | WorkflowState::Downloading | WorkflowState::Sharing
        )
    }
}

/// Salary calculation and multi-channel distribution workflow
#[derive(Debug)]
pub struct SalaryWorkflow {
    state: WorkflowState,
    employees: Vec<EmployeeSummary>,
    catalog: Vec<CommunicationChannel>,
    query: String,
    department: Option<String>,
    selected: Option<EmployeeSummary>,
    year: i32,
    month: u32,
    calculation: Option<SalaryCalculation>,
    channels: ChannelSelection,
    share_outcome: Option<ShareSalarySlipResponse>,
    next_ticket: u64,
}

impl SalaryWorkflow {
    /// Start the workflow from the fetched employee list and channel catalog;
    /// the channel selection is seeded from the backend default.
    pub fn new(employees: Vec<EmployeeSummary>, catalog: ChannelCatalogResponse) -> Self {
        Self {
            state: WorkflowState::Idle,
            employees,
            channels: ChannelSelection::seeded(&catalog.default_selection),
            catalog: catalog.channels,
            query: String::new(),
            department: None,
            selected: None,
            year: 2025,
            month: 1,
            calculation: None,
            share_outcome: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn catalog(&self) -> &[CommunicationChannel] {
        &self.catalog
    }

    pub fn channels(&self) -> &ChannelSelection {
        &self.channels
    }

    pub fn selected_employee(&self) -> Option<&EmployeeSummary> {
        self.selected.as_ref()
    }

    pub fn calculation(&self) -> Option<&SalaryCalculation> {
        self.calculation.as_ref()
    }

    pub fn share_outcome(&self) -> Option<&ShareSalarySlipResponse> {
        self.share_outcome.as_ref()
    }

    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    // ========== Employee selection ==========

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_department_filter(&mut self, department: Option<String>) {
        self.department = department;
    }

    pub fn department_filter(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Distinct departments across the full list, sorted, for the filter control
    pub fn departments(&self) -> Vec<String> {
        let mut departments: Vec<String> = self
            .employees
            .iter()
            .map(|e| e.department.clone())
            .collect();
        departments.sort();
        departments.dedup();
        departments
    }

    /// Subset of the fetched list matching the free-text query
    /// (case-insensitive substring on name or employee code) and the
    /// department filter. Filtering is entirely client-side, no pagination.
    pub fn visible_employees(&self) -> Vec<&EmployeeSummary> {
        let needle = self.query.to_lowercase();
        self.employees
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.full_name.to_lowercase().contains(&needle)
                    || e.employee_id.to_lowercase().contains(&needle)
            })
            .filter(|e| match &self.department {
                Some(dept) => &e.department == dept,
                None => true,
            })
            .collect()
    }

    /// Enter detail mode for one employee. Clears any previous calculation
    /// and sharing result. Allowed while a calculation is in flight: the
    /// pending response becomes stale and will be discarded on arrival.
    pub fn select_employee(&mut self, employee_id: &str) -> Result<(), WorkflowError> {
        let employee = self
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned()
            .ok_or_else(|| WorkflowError::UnknownEmployee(employee_id.to_string()))?;

        self.selected = Some(employee);
        self.calculation = None;
        self.share_outcome = None;
        self.state = WorkflowState::EmployeeSelected;
        Ok(())
    }

    /// Back to the selection list: resets query, filter, selection and all
    /// per-employee state.
    pub fn back_to_selection(&mut self) {
        self.query.clear();
        self.department = None;
        self.selected = None;
        self.calculation = None;
        self.share_outcome = None;
        self.state = WorkflowState::Idle;
    }

    // ========== Period ==========

    pub fn set_period(&mut self, year: i32, month: u32) -> Result<(), WorkflowError> {
        if !ALLOWED_YEARS.contains(&year) || !(1..=12).contains(&month) {
            return Err(WorkflowError::InvalidPeriod { year, month });
        }
        self.year = year;
        self.month = month;
        Ok(())
    }

    // ========== Calculation ==========

    /// Issue a calculation for the selected employee and period. Returns the
    /// ticket identifying this request plus the request payload to send.
    pub fn begin_calculation(
        &mut self,
    ) -> Result<(u64, SalaryCalculationRequest), WorkflowError> {
        if self.state.is_busy() {
            return Err(WorkflowError::RequestInFlight);
        }
        let employee = self
            .selected
            .as_ref()
            .ok_or(WorkflowError::NoEmployeeSelected)?;

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.state = WorkflowState::Calculating { ticket };

        Ok((
            ticket,
            SalaryCalculationRequest {
                employee_id: employee.employee_id.clone(),
                year: self.year,
                month: self.month,
            },
        ))
    }

    /// Apply a completed calculation. Returns `false` (and changes nothing)
    /// when the response is stale: superseded ticket, or the selection moved
    /// to a different employee while the request was in flight.
    pub fn apply_calculation(&mut self, ticket: u64, calculation: SalaryCalculation) -> bool {
        let current = matches!(self.state, WorkflowState::Calculating { ticket: t } if t == ticket);
        let same_employee = self
            .selected
            .as_ref()
            .is_some_and(|e| e.employee_id == calculation.employee_info.employee_id);

        if !current || !same_employee {
            tracing::debug!(ticket, "Discarding stale calculation response");
            return false;
        }

        self.calculation = Some(calculation);
        self.share_outcome = None;
        self.state = WorkflowState::Calculated;
        true
    }

    /// Record a failed calculation. Returns the notification message to show
    /// when the failure belongs to the current request; stale failures are
    /// silently dropped. State returns to the prior stable state.
    pub fn calculation_failed(&mut self, ticket: u64, detail: &str) -> Option<String> {
        if !matches!(self.state, WorkflowState::Calculating { ticket: t } if t == ticket) {
            return None;
        }
        self.state = if self.calculation.is_some() {
            WorkflowState::Calculated
        } else {
            WorkflowState::EmployeeSelected
        };
        Some(detail.to_string())
    }

    // ========== Channels ==========

    pub fn toggle_channel(&mut self, channel: shared::models::ChannelId) {
        self.channels.toggle(channel);
    }

    // ========== Download ==========

    /// Request the payslip document for the calculated period
    pub fn begin_download(&mut self) -> Result<SalaryCalculationRequest, WorkflowError> {
        if self.state.is_busy() {
            return Err(WorkflowError::RequestInFlight);
        }
        if self.state != WorkflowState::Calculated {
            return Err(WorkflowError::NotCalculated);
        }
        let employee = self
            .selected
            .as_ref()
            .ok_or(WorkflowError::NoEmployeeSelected)?;

        self.state = WorkflowState::Downloading;
        Ok(SalaryCalculationRequest {
            employee_id: employee.employee_id.clone(),
            year: self.year,
            month: self.month,
        })
    }

    pub fn download_finished(&mut self) {
        if self.state == WorkflowState::Downloading {
            self.state = WorkflowState::Calculated;
        }
    }

    pub fn download_failed(&mut self, detail: &str) -> String {
        if self.state == WorkflowState::Downloading {
            self.state = WorkflowState::Calculated;
        }
        detail.to_string()
    }

    // ========== Generate & Share ==========

    /// Validate and issue a share request. An empty channel selection is
    /// rejected here, before any network call.
    pub fn begin_share(&mut self) -> Result<ShareSalarySlipRequest, WorkflowError> {
        if self.state.is_busy() {
            return Err(WorkflowError::RequestInFlight);
        }
        if self.state != WorkflowState::Calculated {
            return Err(WorkflowError::NotCalculated);
        }
        if self.channels.is_empty() {
            return Err(WorkflowError::NoChannelsSelected);
        }
        let employee = self
            .selected
            .as_ref()
            .ok_or(WorkflowError::NoEmployeeSelected)?;

        self.state = WorkflowState::Sharing;
        Ok(ShareSalarySlipRequest {
            employee_id: employee.employee_id.clone(),
            year: self.year,
            month: self.month,
            channels: self.channels.to_vec(),
        })
    }

    /// Store the sharing outcome. Partial success is a valid terminal state;
    /// successful and failed channels are kept separate for rendering.
    pub fn share_finished(&mut self, outcome: ShareSalarySlipResponse) {
        if self.state == WorkflowState::Sharing {
            self.share_outcome = Some(outcome);
            self.state = WorkflowState::Calculated;
        }
    }

    pub fn share_failed(&mut self, detail: &str) -> String {
        if self.state == WorkflowState::Sharing {
            self.state = WorkflowState::Calculated;
        }
        detail.to_string()
    }
}
