//! Async request tasks
//!
//! Each function spawns one request onto the runtime and reports the result
//! back into the event loop as an [`AppMessage`]. Send failures mean the UI
//! is already gone and are ignored.

use crate::app::AppMessage;
use hrms_client::HttpClient;
use shared::api::{SalaryCalculationRequest, ShareSalarySlipRequest};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

pub fn spawn_login(
    tx: UnboundedSender<AppMessage>,
    client: HttpClient,
    username: String,
    password: String,
) {
    tokio::spawn(async move {
        let message = match client.login(&username, &password).await {
            Ok((session, _)) => {
                let authed = client.with_token(&session.token);
                let selection = authed.salary_employee_selection().await;
                let channels = authed.communication_channels().await;
                match (selection, channels) {
                    (Ok(selection), Ok(catalog)) => AppMessage::LoginSucceeded {
                        client: authed,
                        session,
                        employees: selection.employees,
                        catalog,
                    },
                    (Err(e), _) | (_, Err(e)) => {
                        AppMessage::LoginFailed(e.user_message("Failed to load workflow data"))
                    }
                }
            }
            Err(e) => AppMessage::LoginFailed(e.user_message("Login failed")),
        };
        let _ = tx.send(message);
    });
}

pub fn spawn_directory(tx: UnboundedSender<AppMessage>, client: HttpClient) {
    tokio::spawn(async move {
        let message = match client.employees().await {
            Ok(records) => AppMessage::DirectoryLoaded(records),
            Err(e) => AppMessage::DirectoryFailed(e.user_message("Failed to load employees")),
        };
        let _ = tx.send(message);
    });
}

pub fn spawn_calculation(
    tx: UnboundedSender<AppMessage>,
    client: HttpClient,
    ticket: u64,
    request: SalaryCalculationRequest,
) {
    tokio::spawn(async move {
        let message = match client.calculate_salary(&request).await {
            Ok(response) => AppMessage::CalculationReady {
                ticket,
                calculation: response.calculation,
            },
            Err(e) => AppMessage::CalculationFailed {
                ticket,
                detail: e.user_message("Salary calculation failed"),
            },
        };
        let _ = tx.send(message);
    });
}

pub fn spawn_download(
    tx: UnboundedSender<AppMessage>,
    client: HttpClient,
    request: SalaryCalculationRequest,
    download_dir: PathBuf,
) {
    tokio::spawn(async move {
        let message = match client.generate_salary_slip(&request).await {
            Ok(slip) => match slip.save_into(&download_dir) {
                Ok(path) => AppMessage::SlipSaved(path),
                Err(e) => AppMessage::DownloadFailed(format!("Failed to save payslip: {}", e)),
            },
            Err(e) => AppMessage::DownloadFailed(e.user_message("Failed to generate payslip")),
        };
        let _ = tx.send(message);
    });
}

pub fn spawn_share(
    tx: UnboundedSender<AppMessage>,
    client: HttpClient,
    request: ShareSalarySlipRequest,
) {
    tokio::spawn(async move {
        let message = match client
            .generate_and_share_salary_slip(
                &request.employee_id,
                request.year,
                request.month,
                request.channels,
            )
            .await
        {
            Ok(response) => AppMessage::ShareCompleted(Box::new(response)),
            Err(e) => AppMessage::ShareFailed(e.user_message("Failed to share the salary slip")),
        };
        let _ = tx.send(message);
    });
}
