// End-to-end contract tests: the real client against the in-memory backend
// bound to an ephemeral port.

use hrms_client::{ClientConfig, ClientError, HttpClient};
use hrms_backend_mock::{AppState, router};
use shared::api::SalaryCalculationRequest;
use shared::models::ChannelId;
use std::sync::Arc;

async fn start_backend() -> String {
    let state = Arc::new(AppState::seeded());
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn logged_in_client() -> HttpClient {
    let base_url = start_backend().await;
    let client = ClientConfig::new(&base_url).build_http_client();
    let (session, _) = client.login("asha.rao", "password123").await.unwrap();
    client.with_token(&session.token)
}

fn march_request(employee_id: &str) -> SalaryCalculationRequest {
    SalaryCalculationRequest {
        employee_id: employee_id.to_string(),
        year: 2025,
        month: 3,
    }
}

#[tokio::test]
async fn login_returns_a_session_for_the_employee() {
    let base_url = start_backend().await;
    let client = ClientConfig::new(&base_url).build_http_client();

    let (session, response) = client.login("asha.rao", "password123").await.unwrap();
    assert_eq!(session.user.employee_id, "E100");
    assert_eq!(response.employee.full_name, "Asha Rao");
    assert!(!session.token.is_empty());
}

#[tokio::test]
async fn login_failure_surfaces_the_backend_detail() {
    let base_url = start_backend().await;
    let client = ClientConfig::new(&base_url).build_http_client();

    let err = client.login("asha.rao", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(
        err.user_message("Login failed"),
        "Invalid username or password"
    );
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let base_url = start_backend().await;
    let client = ClientConfig::new(&base_url).build_http_client();

    let err = client.employees().await.unwrap_err();
    match err {
        ClientError::Unauthorized(detail) => assert_eq!(detail, "Not authenticated"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_employee_surfaces_not_found_detail() {
    let client = logged_in_client().await;
    let err = client
        .calculate_salary(&march_request("E999"))
        .await
        .unwrap_err();
    match err {
        ClientError::NotFound(detail) => assert_eq!(detail, "Employee not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn calculation_figures_hold_the_arithmetic_invariants() {
    let client = logged_in_client().await;
    let selection = client.salary_employee_selection().await.unwrap();
    assert!(!selection.employees.is_empty());

    for employee in &selection.employees {
        let response = client
            .calculate_salary(&march_request(&employee.employee_id))
            .await
            .unwrap();
        let calc = &response.calculation;

        assert!(
            (calc.earnings.gross_salary - calc.earnings.component_total()).abs() < 0.01,
            "gross mismatch for {}",
            employee.employee_id
        );
        assert!(
            (calc.net_salary
                - (calc.earnings.gross_salary - calc.deductions.total_deductions))
                .abs()
                < 0.01,
            "net mismatch for {}",
            employee.employee_id
        );
    }
}

#[tokio::test]
async fn full_attendance_march_figures_are_exact() {
    let client = logged_in_client().await;
    let calc = client
        .calculate_salary(&march_request("E100"))
        .await
        .unwrap()
        .calculation;

    assert_eq!(calc.employee_info.calculation_month, "March 2025");
    assert_eq!(calc.employee_details.total_working_days, 26);
    assert_eq!(calc.earnings.gross_salary, 66850.0);
    assert_eq!(calc.deductions.total_deductions, 4935.0);
    assert_eq!(calc.net_salary, 61915.0);
}

#[tokio::test]
async fn invalid_month_is_a_validation_error() {
    let client = logged_in_client().await;
    let request = SalaryCalculationRequest {
        employee_id: "E100".to_string(),
        year: 2025,
        month: 13,
    };
    let err = client.calculate_salary(&request).await.unwrap_err();
    match err {
        ClientError::Validation(detail) => assert_eq!(detail, "Invalid month"),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn downloaded_slip_is_saved_under_the_server_filename() {
    let client = logged_in_client().await;
    let slip = client
        .generate_salary_slip(&march_request("E100"))
        .await
        .unwrap();
    assert_eq!(slip.filename, "Salary_Slip_Asha_Rao_2025_03.pdf");
    assert!(slip.bytes.starts_with(b"%PDF"));

    let dir = tempfile::tempdir().unwrap();
    let path = slip.save_into(dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Salary_Slip_Asha_Rao_2025_03.pdf"
    );
    assert_eq!(std::fs::read(&path).unwrap(), slip.bytes);
}

#[tokio::test]
async fn partial_share_reports_success_and_failure_separately() {
    let client = logged_in_client().await;

    // E103 has an email address but no contact number on file
    let response = client
        .generate_and_share_salary_slip("E103", 2025, 3, vec![ChannelId::Email, ChannelId::Sms])
        .await
        .unwrap();

    let results = &response.sharing_results;
    assert_eq!(results.successful_channels, vec![ChannelId::Email]);
    assert_eq!(results.failed_channels, vec![ChannelId::Sms]);
    assert!(!results.is_full_success());
    assert_eq!(
        results.results[&ChannelId::Sms].message,
        "No contact number on file"
    );
    assert!(
        results.results[&ChannelId::Email]
            .message
            .contains("divya.pillai@example.com")
    );
}

#[tokio::test]
async fn empty_channel_list_is_rejected_by_the_backend_too() {
    let client = logged_in_client().await;
    let err = client
        .generate_and_share_salary_slip("E100", 2025, 3, Vec::new())
        .await
        .unwrap_err();
    match err {
        ClientError::Validation(detail) => {
            assert_eq!(detail, "Please select at least one communication channel")
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn select_calculate_share_over_email_end_to_end() {
    let base_url = start_backend().await;
    let client = ClientConfig::new(&base_url).build_http_client();

    let (session, _) = client.login("asha.rao", "password123").await.unwrap();
    let client = client.with_token(&session.token);

    let selection = client.salary_employee_selection().await.unwrap();
    let catalog = client.communication_channels().await.unwrap();
    assert_eq!(catalog.channels.len(), 3);
    assert!(catalog.default_selection.contains(&ChannelId::Email));

    let mut workflow =
        hrms_client::SalaryWorkflow::new(selection.employees, catalog);
    workflow.select_employee("E100").unwrap();
    workflow.set_period(2025, 3).unwrap();

    let (ticket, request) = workflow.begin_calculation().unwrap();
    let response = client.calculate_salary(&request).await.unwrap();
    assert!(workflow.apply_calculation(ticket, response.calculation));

    // Narrow the selection down to email only
    workflow.toggle_channel(ChannelId::Whatsapp);
    let share_request = workflow.begin_share().unwrap();
    assert_eq!(share_request.channels, vec![ChannelId::Email]);

    let outcome = client
        .generate_and_share_salary_slip(
            &share_request.employee_id,
            share_request.year,
            share_request.month,
            share_request.channels,
        )
        .await
        .unwrap();
    workflow.share_finished(outcome);

    let outcome = workflow.share_outcome().unwrap();
    assert!(outcome.sharing_results.is_full_success());
    assert_eq!(outcome.sharing_results.successful_channels, vec![ChannelId::Email]);
    assert!(outcome.sharing_results.failed_channels.is_empty());
    assert!(
        outcome.sharing_results.results[&ChannelId::Email]
            .message
            .contains("asha.rao@example.com")
    );
    assert!(outcome.digital_signature.is_some());
}
