//! HTTP surface
//!
//! Route handlers mirror the production backend contract: JSON bodies on
//! success, `{ "detail": "..." }` with a non-2xx status on failure. All
//! endpoints except login require a bearer token.

use crate::state::AppState;
use crate::{fixtures, salary, sharing};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::api::{
    AnnouncementCreate, ApiErrorBody, AttendanceEvent, AttendanceEventResponse,
    CalculateSalaryResponse, ChannelCatalogResponse, DocumentTypesResponse, DocumentUploadRequest,
    EmployeeSelectionResponse, LoginRequest, LoginResponse, SalaryCalculationRequest,
    SalarySlipResponse, ShareSalarySlipRequest, ShareSalarySlipResponse,
};
use shared::models::{
    Announcement, AttendanceRecord, AttendanceStatus, ChannelId, CommunicationChannel, Document,
    DocumentType, EmployeeRecord, EmployeeSummary,
};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Employee code of the authenticated user
    sub: String,
    exp: usize,
}

/// Error response in the backend's wire convention
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ============================================================================
// Auth
// ============================================================================

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let employee = state
        .employee_by_username(&req.username)
        .filter(|_| req.password == fixtures::PASSWORD)
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let expiration = Utc::now() + Duration::hours(8);
    let claims = Claims {
        sub: employee.employee_id.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token")
    })?;

    tracing::info!(employee_id = %employee.employee_id, "Login successful");
    Ok(Json(LoginResponse {
        access_token: token,
        employee: employee.clone(),
    }))
}

/// Verify the bearer token and return its claims
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::unauthorized("Invalid or expired token"))
}

fn find_employee<'a>(
    state: &'a AppState,
    employee_id: &str,
) -> Result<&'a EmployeeRecord, ApiError> {
    state
        .employee(employee_id)
        .ok_or_else(|| ApiError::not_found("Employee not found"))
}

// ============================================================================
// Employees
// ============================================================================

async fn list_employees(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<EmployeeRecord>> {
    authorize(&state, &headers)?;
    Ok(Json(state.employees.clone()))
}

async fn get_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
) -> ApiResult<EmployeeRecord> {
    authorize(&state, &headers)?;
    Ok(Json(find_employee(&state, &employee_id)?.clone()))
}

// ============================================================================
// Attendance
// ============================================================================

async fn attendance_login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(event): Json<AttendanceEvent>,
) -> ApiResult<AttendanceEventResponse> {
    authorize(&state, &headers)?;
    let employee = find_employee(&state, &event.employee_id)?;

    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();

    let mut attendance = state.attendance.write().await;
    if attendance
        .iter()
        .any(|r| r.employee_id == event.employee_id && r.date == today)
    {
        return Err(ApiError::bad_request("Already logged in today"));
    }

    let record = AttendanceRecord {
        id: uuid::Uuid::new_v4().to_string(),
        employee_id: employee.employee_id.clone(),
        employee_name: employee.full_name.clone(),
        login_time: now,
        logout_time: None,
        login_location: event.location,
        logout_location: Default::default(),
        date: today,
        total_hours: 0.0,
        status: AttendanceStatus::LoggedIn,
    };
    attendance.push(record.clone());

    tracing::info!(employee_id = %record.employee_id, "Attendance login");
    Ok(Json(AttendanceEventResponse {
        message: "Logged in successfully".to_string(),
        record,
    }))
}

async fn attendance_logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(event): Json<AttendanceEvent>,
) -> ApiResult<AttendanceEventResponse> {
    authorize(&state, &headers)?;
    find_employee(&state, &event.employee_id)?;

    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();

    let mut attendance = state.attendance.write().await;
    let record = attendance
        .iter_mut()
        .find(|r| {
            r.employee_id == event.employee_id
                && r.date == today
                && r.status == AttendanceStatus::LoggedIn
        })
        .ok_or_else(|| ApiError::bad_request("Not logged in today"))?;

    record.logout_time = Some(now);
    record.logout_location = event.location;
    record.total_hours = salary::round2((now - record.login_time).num_seconds() as f64 / 3600.0);
    record.status = AttendanceStatus::LoggedOut;

    tracing::info!(employee_id = %record.employee_id, "Attendance logout");
    Ok(Json(AttendanceEventResponse {
        message: "Logged out successfully".to_string(),
        record: record.clone(),
    }))
}

async fn attendance_today(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<AttendanceRecord>> {
    authorize(&state, &headers)?;
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let attendance = state.attendance.read().await;
    Ok(Json(
        attendance.iter().filter(|r| r.date == today).cloned().collect(),
    ))
}

// ============================================================================
// Salary
// ============================================================================

async fn employee_selection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<EmployeeSelectionResponse> {
    authorize(&state, &headers)?;
    Ok(Json(EmployeeSelectionResponse {
        employees: state.employees.iter().map(EmployeeSummary::from).collect(),
    }))
}

async fn communication_channels(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<ChannelCatalogResponse> {
    authorize(&state, &headers)?;
    Ok(Json(ChannelCatalogResponse {
        channels: vec![
            CommunicationChannel {
                id: ChannelId::Email,
                name: "Email".to_string(),
                icon: "📧".to_string(),
                description: "Send the salary slip as a PDF attachment".to_string(),
                recommended: true,
            },
            CommunicationChannel {
                id: ChannelId::Whatsapp,
                name: "WhatsApp".to_string(),
                icon: "💬".to_string(),
                description: "Send the salary slip to the registered number".to_string(),
                recommended: false,
            },
            CommunicationChannel {
                id: ChannelId::Sms,
                name: "SMS".to_string(),
                icon: "📱".to_string(),
                description: "Send a download link by text message".to_string(),
                recommended: false,
            },
        ],
        default_selection: vec![ChannelId::Email, ChannelId::Whatsapp],
    }))
}

/// Present days for the period: attendance records when any exist for the
/// month, otherwise full attendance. Keeps repeated calculations idempotent.
async fn present_days(state: &AppState, employee_id: &str, year: i32, month: u32) -> Option<u32> {
    let attendance = state.attendance.read().await;
    let recorded = attendance
        .iter()
        .filter(|r| {
            r.employee_id == employee_id
                && r.login_time.year() == year
                && r.login_time.month() == month
        })
        .count() as u32;

    if recorded > 0 {
        Some(recorded)
    } else {
        salary::working_days(year, month)
    }
}

fn validate_period(request: &SalaryCalculationRequest) -> Result<(), ApiError> {
    if !(1..=12).contains(&request.month) {
        return Err(ApiError::bad_request("Invalid month"));
    }
    Ok(())
}

async fn calculate_salary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    Json(request): Json<SalaryCalculationRequest>,
) -> ApiResult<CalculateSalaryResponse> {
    authorize(&state, &headers)?;
    validate_period(&request)?;
    let employee = find_employee(&state, &employee_id)?;

    let days = present_days(&state, &employee_id, request.year, request.month)
        .await
        .ok_or_else(|| ApiError::bad_request("Invalid month"))?;
    let calculation = salary::calculate(employee, request.year, request.month, days)
        .ok_or_else(|| ApiError::bad_request("Invalid month"))?;

    tracing::info!(
        employee_id = %employee_id,
        period = %calculation.employee_info.calculation_month,
        net = calculation.net_salary,
        "Salary calculated"
    );
    Ok(Json(CalculateSalaryResponse {
        message: "Salary calculated successfully".to_string(),
        calculation,
    }))
}

async fn generate_salary_slip(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    Json(request): Json<SalaryCalculationRequest>,
) -> ApiResult<SalarySlipResponse> {
    authorize(&state, &headers)?;
    validate_period(&request)?;
    let employee = find_employee(&state, &employee_id)?;

    let days = present_days(&state, &employee_id, request.year, request.month)
        .await
        .ok_or_else(|| ApiError::bad_request("Invalid month"))?;
    let calculation = salary::calculate(employee, request.year, request.month, days)
        .ok_or_else(|| ApiError::bad_request("Invalid month"))?;

    let pdf = sharing::render_payslip(&calculation);
    Ok(Json(SalarySlipResponse {
        message: "Salary slip generated successfully".to_string(),
        employee_id: employee.employee_id.clone(),
        employee_name: employee.full_name.clone(),
        month_year: calculation.employee_info.calculation_month.clone(),
        pdf_data: STANDARD.encode(&pdf),
        filename: sharing::payslip_filename(&employee.full_name, request.year, request.month),
    }))
}

async fn generate_and_share_salary_slip(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    Json(request): Json<ShareSalarySlipRequest>,
) -> ApiResult<ShareSalarySlipResponse> {
    authorize(&state, &headers)?;
    if request.channels.is_empty() {
        return Err(ApiError::bad_request(
            "Please select at least one communication channel",
        ));
    }
    if !(1..=12).contains(&request.month) {
        return Err(ApiError::bad_request("Invalid month"));
    }
    let employee = find_employee(&state, &employee_id)?;

    let days = present_days(&state, &employee_id, request.year, request.month)
        .await
        .ok_or_else(|| ApiError::bad_request("Invalid month"))?;
    let calculation = salary::calculate(employee, request.year, request.month, days)
        .ok_or_else(|| ApiError::bad_request("Invalid month"))?;
    let pdf = sharing::render_payslip(&calculation);

    let results = sharing::share(employee, &request.channels);
    tracing::info!(
        employee_id = %employee_id,
        pdf_bytes = pdf.len(),
        succeeded = results.successful_channels.len(),
        failed = results.failed_channels.len(),
        "Salary slip shared"
    );

    Ok(Json(ShareSalarySlipResponse {
        message: "Salary slip generated and shared".to_string(),
        employee_id: employee.employee_id.clone(),
        employee_name: employee.full_name.clone(),
        year: request.year,
        month: request.month,
        channels_attempted: request.channels,
        sharing_results: results,
        digital_signature: Some(sharing::signature(
            &employee.employee_id,
            request.year,
            request.month,
        )),
    }))
}

// ============================================================================
// Documents
// ============================================================================

async fn list_documents(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
) -> ApiResult<Vec<Document>> {
    authorize(&state, &headers)?;
    find_employee(&state, &employee_id)?;
    let documents = state.documents.read().await;
    Ok(Json(
        documents.get(&employee_id).cloned().unwrap_or_default(),
    ))
}

async fn document_types(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<DocumentTypesResponse> {
    authorize(&state, &headers)?;
    Ok(Json(DocumentTypesResponse {
        types: vec![
            DocumentType::Resume,
            DocumentType::IdProof,
            DocumentType::AddressProof,
            DocumentType::EducationalCertificate,
            DocumentType::ExperienceLetter,
            DocumentType::SalaryCertificate,
            DocumentType::MedicalCertificate,
            DocumentType::Other,
        ],
    }))
}

async fn upload_document(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    Json(request): Json<DocumentUploadRequest>,
) -> ApiResult<Document> {
    let claims = authorize(&state, &headers)?;
    find_employee(&state, &employee_id)?;

    let content = STANDARD
        .decode(request.content.as_bytes())
        .map_err(|_| ApiError::bad_request("Invalid file content"))?;

    let uploader = state
        .employee(&claims.sub)
        .map(|e| e.full_name.clone())
        .unwrap_or_else(|| claims.sub.clone());

    let document = Document {
        id: uuid::Uuid::new_v4().to_string(),
        employee_id: employee_id.clone(),
        document_type: request.document_type,
        document_name: request.document_name,
        file_size: content.len() as u64,
        uploaded_at: Utc::now(),
        uploaded_by: uploader,
        description: request.description,
    };

    let mut documents = state.documents.write().await;
    documents
        .entry(employee_id)
        .or_default()
        .push(document.clone());
    Ok(Json(document))
}

// ============================================================================
// Announcements
// ============================================================================

async fn list_announcements(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<Announcement>> {
    authorize(&state, &headers)?;
    let announcements = state.announcements.read().await;
    Ok(Json(announcements.clone()))
}

async fn create_announcement(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AnnouncementCreate>,
) -> ApiResult<Announcement> {
    let claims = authorize(&state, &headers)?;
    let publisher = state
        .employee(&claims.sub)
        .map(|e| e.full_name.clone())
        .unwrap_or_else(|| claims.sub.clone());

    let announcement = Announcement {
        id: uuid::Uuid::new_v4().to_string(),
        title: request.title,
        content: request.content,
        announcement_type: request.announcement_type,
        priority: request.priority,
        published_by: publisher,
        published_at: Utc::now(),
        valid_until: request.valid_until,
        target_departments: request.target_departments,
    };

    let mut announcements = state.announcements.write().await;
    announcements.push(announcement.clone());
    Ok(Json(announcement))
}

async fn delete_announcement(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    authorize(&state, &headers)?;
    let mut announcements = state.announcements.write().await;
    let before = announcements.len();
    announcements.retain(|a| a.id != id);
    if announcements.len() == before {
        return Err(ApiError::not_found("Announcement not found"));
    }
    Ok(Json(serde_json::json!({
        "message": "Announcement deleted"
    })))
}

pub fn router(state: Arc<AppState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    let concurrency_limit = ConcurrencyLimitLayer::new(100);

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/employees", get(list_employees))
        .route("/api/employees/{employee_id}", get(get_employee))
        .route("/api/attendance/login", post(attendance_login))
        .route("/api/attendance/logout", post(attendance_logout))
        .route("/api/attendance/today", get(attendance_today))
        .route("/api/salary/employee-selection", get(employee_selection))
        .route(
            "/api/salary/communication-channels",
            get(communication_channels),
        )
        .route(
            "/api/employees/{employee_id}/calculate-salary",
            post(calculate_salary),
        )
        .route(
            "/api/employees/{employee_id}/generate-salary-slip",
            post(generate_salary_slip),
        )
        .route(
            "/api/employees/{employee_id}/generate-and-share-salary-slip",
            post(generate_and_share_salary_slip),
        )
        .route(
            "/api/employees/{employee_id}/documents",
            get(list_documents).post(upload_document),
        )
        .route("/api/documents/types", get(document_types))
        .route(
            "/api/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route("/api/announcements/{id}", delete(delete_announcement))
        .layer(concurrency_limit)
        .with_state(state)
}
