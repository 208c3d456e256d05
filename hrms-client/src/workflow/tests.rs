use super::*;
use shared::models::{
    AttendanceDetails, ChannelDelivery, ChannelId, Deductions, DeliveryStatus, Earnings,
    EmployeeInfo, EmployeeStatus, EmployerContributions, SharingResults,
};
use std::collections::BTreeMap;

fn summary(employee_id: &str, full_name: &str, department: &str) -> EmployeeSummary {
    EmployeeSummary {
        employee_id: employee_id.to_string(),
        full_name: full_name.to_string(),
        department: department.to_string(),
        designation: "Engineer".to_string(),
        email_address: format!("{}@example.com", employee_id.to_lowercase()),
        contact_number: "+919800000001".to_string(),
        basic_salary: 40000.0,
        status: EmployeeStatus::Active,
    }
}

fn catalog() -> ChannelCatalogResponse {
    ChannelCatalogResponse {
        channels: ChannelId::ALL
            .iter()
            .map(|&id| CommunicationChannel {
                id,
                name: id.as_str().to_string(),
                icon: String::new(),
                description: String::new(),
                recommended: id == ChannelId::Email,
            })
            .collect(),
        default_selection: vec![ChannelId::Email, ChannelId::Whatsapp],
    }
}

fn workflow() -> SalaryWorkflow {
    SalaryWorkflow::new(
        vec![
            summary("E100", "Asha Rao", "Engineering"),
            summary("E101", "Bharat Iyer", "Engineering"),
            summary("E102", "Chitra Nair", "Sales"),
        ],
        catalog(),
    )
}

fn calculation_for(employee_id: &str) -> SalaryCalculation {
    SalaryCalculation {
        employee_info: EmployeeInfo {
            employee_id: employee_id.to_string(),
            employee_name: "Asha Rao".to_string(),
            department: "Engineering".to_string(),
            designation: "Engineer".to_string(),
            calculation_month: "March 2025".to_string(),
        },
        employee_details: AttendanceDetails {
            present_days: 26,
            total_working_days: 26,
            attendance_percentage: 100.0,
        },
        earnings: Earnings {
            basic_salary: 40000.0,
            hra: 20000.0,
            da: 4000.0,
            medical_allowance: 1250.0,
            transport_allowance: 1600.0,
            special_allowance: 0.0,
            gross_salary: 66850.0,
        },
        deductions: Deductions {
            pf_employee: 1800.0,
            pf_employer: 1800.0,
            esi_employee: 0.0,
            esi_employer: 0.0,
            professional_tax: 200.0,
            income_tax: 2935.0,
            total_deductions: 4935.0,
        },
        net_salary: 61915.0,
        employer_contributions: EmployerContributions {
            pf_employer: 1800.0,
            esi_employer: 0.0,
            total_employer_contribution: 1800.0,
        },
    }
}

fn share_outcome(employee_id: &str) -> ShareSalarySlipResponse {
    let mut results = BTreeMap::new();
    results.insert(
        ChannelId::Email,
        ChannelDelivery {
            status: DeliveryStatus::Success,
            message: "Sent".to_string(),
            recipient: Some("e100@example.com".to_string()),
        },
    );
    results.insert(
        ChannelId::Sms,
        ChannelDelivery {
            status: DeliveryStatus::Failure,
            message: "No contact number on file".to_string(),
            recipient: None,
        },
    );
    ShareSalarySlipResponse {
        message: "Salary slip generated and shared".to_string(),
        employee_id: employee_id.to_string(),
        employee_name: "Asha Rao".to_string(),
        year: 2025,
        month: 3,
        channels_attempted: vec![ChannelId::Email, ChannelId::Sms],
        sharing_results: SharingResults {
            successful_channels: vec![ChannelId::Email],
            failed_channels: vec![ChannelId::Sms],
            results,
        },
        digital_signature: None,
    }
}

#[test]
fn happy_path_transitions() {
    let mut wf = workflow();
    assert_eq!(wf.state(), WorkflowState::Idle);

    wf.select_employee("E100").unwrap();
    assert_eq!(wf.state(), WorkflowState::EmployeeSelected);

    wf.set_period(2025, 3).unwrap();
    let (ticket, request) = wf.begin_calculation().unwrap();
    assert_eq!(wf.state(), WorkflowState::Calculating { ticket });
    assert_eq!(request.employee_id, "E100");
    assert_eq!((request.year, request.month), (2025, 3));

    assert!(wf.apply_calculation(ticket, calculation_for("E100")));
    assert_eq!(wf.state(), WorkflowState::Calculated);
    assert!(wf.calculation().is_some());

    let download = wf.begin_download().unwrap();
    assert_eq!(wf.state(), WorkflowState::Downloading);
    assert_eq!(download.employee_id, "E100");
    wf.download_finished();
    assert_eq!(wf.state(), WorkflowState::Calculated);

    let share = wf.begin_share().unwrap();
    assert_eq!(wf.state(), WorkflowState::Sharing);
    assert_eq!(share.channels, vec![ChannelId::Email, ChannelId::Whatsapp]);
    wf.share_finished(share_outcome("E100"));
    assert_eq!(wf.state(), WorkflowState::Calculated);
    let outcome = wf.share_outcome().unwrap();
    assert_eq!(outcome.sharing_results.successful_channels.len(), 1);
    assert_eq!(outcome.sharing_results.failed_channels.len(), 1);
    assert!(!outcome.sharing_results.is_full_success());
}

#[test]
fn calculation_requires_a_selected_employee() {
    let mut wf = workflow();
    assert_eq!(
        wf.begin_calculation().unwrap_err(),
        WorkflowError::NoEmployeeSelected
    );
}

#[test]
fn selecting_unknown_employee_fails() {
    let mut wf = workflow();
    assert_eq!(
        wf.select_employee("E999").unwrap_err(),
        WorkflowError::UnknownEmployee("E999".to_string())
    );
    assert_eq!(wf.state(), WorkflowState::Idle);
}

#[test]
fn superseded_ticket_is_discarded() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();

    let (first, _) = wf.begin_calculation().unwrap();
    // The first request never completed; user re-selects and re-issues
    wf.select_employee("E100").unwrap();
    let (second, _) = wf.begin_calculation().unwrap();
    assert_ne!(first, second);

    assert!(!wf.apply_calculation(first, calculation_for("E100")));
    assert_eq!(wf.state(), WorkflowState::Calculating { ticket: second });
    assert!(wf.calculation().is_none());

    assert!(wf.apply_calculation(second, calculation_for("E100")));
    assert_eq!(wf.state(), WorkflowState::Calculated);
}

#[test]
fn response_for_previous_employee_is_discarded() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    let (ticket, _) = wf.begin_calculation().unwrap();

    // Switch employees while the request is in flight
    wf.select_employee("E101").unwrap();
    assert!(!wf.apply_calculation(ticket, calculation_for("E100")));
    assert!(wf.calculation().is_none());
    assert_eq!(wf.state(), WorkflowState::EmployeeSelected);
}

#[test]
fn duplicate_submission_is_refused_while_in_flight() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    let (_, _) = wf.begin_calculation().unwrap();
    assert_eq!(
        wf.begin_calculation().unwrap_err(),
        WorkflowError::RequestInFlight
    );
}

#[test]
fn failed_calculation_returns_to_stable_state() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    let (ticket, _) = wf.begin_calculation().unwrap();

    let notice = wf.calculation_failed(ticket, "Employee not found");
    assert_eq!(notice.as_deref(), Some("Employee not found"));
    assert_eq!(wf.state(), WorkflowState::EmployeeSelected);

    // A stale failure is silently dropped
    assert!(wf.calculation_failed(ticket, "late").is_none());
}

#[test]
fn share_requires_a_calculation() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    assert_eq!(wf.begin_share().unwrap_err(), WorkflowError::NotCalculated);
    assert_eq!(wf.begin_download().unwrap_err(), WorkflowError::NotCalculated);
}

#[test]
fn empty_channel_selection_is_rejected_before_any_request() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    let (ticket, _) = wf.begin_calculation().unwrap();
    wf.apply_calculation(ticket, calculation_for("E100"));

    // Deselect everything the backend seeded
    wf.toggle_channel(ChannelId::Email);
    wf.toggle_channel(ChannelId::Whatsapp);
    assert!(wf.channels().is_empty());

    assert_eq!(
        wf.begin_share().unwrap_err(),
        WorkflowError::NoChannelsSelected
    );
    // The workflow stays in a sharable state; no request was issued
    assert_eq!(wf.state(), WorkflowState::Calculated);
}

#[test]
fn share_failure_keeps_calculation() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    let (ticket, _) = wf.begin_calculation().unwrap();
    wf.apply_calculation(ticket, calculation_for("E100"));

    wf.begin_share().unwrap();
    let notice = wf.share_failed("Backend unavailable");
    assert_eq!(notice, "Backend unavailable");
    assert_eq!(wf.state(), WorkflowState::Calculated);
    assert!(wf.calculation().is_some());
    assert!(wf.share_outcome().is_none());
}

#[test]
fn period_bounds_are_enforced() {
    let mut wf = workflow();
    assert!(wf.set_period(2024, 1).is_ok());
    assert!(wf.set_period(2026, 12).is_ok());
    assert_eq!(
        wf.set_period(2023, 6).unwrap_err(),
        WorkflowError::InvalidPeriod { year: 2023, month: 6 }
    );
    assert_eq!(
        wf.set_period(2025, 13).unwrap_err(),
        WorkflowError::InvalidPeriod { year: 2025, month: 13 }
    );
    assert_eq!(
        wf.set_period(2025, 0).unwrap_err(),
        WorkflowError::InvalidPeriod { year: 2025, month: 0 }
    );
    // Rejected values do not clobber the stored period
    assert_eq!(wf.period(), (2026, 12));
}

#[test]
fn visible_employees_filters_by_query_and_department() {
    let mut wf = workflow();

    wf.set_query("asha");
    let visible: Vec<_> = wf.visible_employees();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].employee_id, "E100");

    // Query also matches the employee code, case-insensitively
    wf.set_query("e10");
    assert_eq!(wf.visible_employees().len(), 3);

    wf.set_department_filter(Some("Sales".to_string()));
    let visible = wf.visible_employees();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].employee_id, "E102");

    wf.set_query("nomatch");
    assert!(wf.visible_employees().is_empty());
}

#[test]
fn back_to_selection_resets_everything() {
    let mut wf = workflow();
    wf.set_query("asha");
    wf.set_department_filter(Some("Engineering".to_string()));
    wf.select_employee("E100").unwrap();
    let (ticket, _) = wf.begin_calculation().unwrap();
    wf.apply_calculation(ticket, calculation_for("E100"));
    wf.begin_share().unwrap();
    wf.share_finished(share_outcome("E100"));

    wf.back_to_selection();
    assert_eq!(wf.state(), WorkflowState::Idle);
    assert!(wf.selected_employee().is_none());
    assert!(wf.calculation().is_none());
    assert!(wf.share_outcome().is_none());
    assert_eq!(wf.visible_employees().len(), 3);
}

#[test]
fn recalculation_clears_previous_share_outcome() {
    let mut wf = workflow();
    wf.select_employee("E100").unwrap();
    let (ticket, _) = wf.begin_calculation().unwrap();
    wf.apply_calculation(ticket, calculation_for("E100"));
    wf.begin_share().unwrap();
    wf.share_finished(share_outcome("E100"));
    assert!(wf.share_outcome().is_some());

    let (ticket, _) = wf.begin_calculation().unwrap();
    wf.apply_calculation(ticket, calculation_for("E100"));
    assert!(wf.share_outcome().is_none());
}
