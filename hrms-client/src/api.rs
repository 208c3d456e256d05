//! Typed endpoint wrappers
//!
//! One method per backend endpoint, grouped by area. All paths are relative
//! to the `/api` prefix of the configured base URL.

use crate::{ClientResult, HttpClient, PayslipFile, Session};
use shared::api::{
    AnnouncementCreate, AttendanceEvent, AttendanceEventResponse, CalculateSalaryResponse,
    ChannelCatalogResponse, DocumentTypesResponse, DocumentUploadRequest,
    EmployeeSelectionResponse, LoginRequest, LoginResponse, SalaryCalculationRequest,
    SalarySlipResponse, ShareSalarySlipRequest, ShareSalarySlipResponse,
};
use shared::models::{
    Announcement, AttendanceRecord, ChannelId, Document, EmployeeRecord, GeoLocation,
};

impl HttpClient {
    // ========== Auth API ==========

    /// Login with username and password; the returned session carries the
    /// bearer token to attach to this client via `with_token`.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<(Session, LoginResponse)> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("/api/auth/login", &request).await?;
        let session = Session::from_login(&response);
        tracing::info!(employee_id = %session.user.employee_id, "Logged in");
        Ok((session, response))
    }

    // ========== Employee API ==========

    /// List all employee records
    pub async fn employees(&self) -> ClientResult<Vec<EmployeeRecord>> {
        self.get("/api/employees").await
    }

    /// Get a single employee record by external employee code
    pub async fn employee(&self, employee_id: &str) -> ClientResult<EmployeeRecord> {
        self.get(&format!("/api/employees/{}", employee_id)).await
    }

    // ========== Attendance API ==========

    /// Clock in with a captured geolocation
    pub async fn attendance_login(
        &self,
        employee_id: &str,
        location: GeoLocation,
    ) -> ClientResult<AttendanceEventResponse> {
        let event = AttendanceEvent {
            employee_id: employee_id.to_string(),
            location,
        };
        self.post("/api/attendance/login", &event).await
    }

    /// Clock out with a captured geolocation
    pub async fn attendance_logout(
        &self,
        employee_id: &str,
        location: GeoLocation,
    ) -> ClientResult<AttendanceEventResponse> {
        let event = AttendanceEvent {
            employee_id: employee_id.to_string(),
            location,
        };
        self.post("/api/attendance/logout", &event).await
    }

    /// Today's attendance records across all employees
    pub async fn attendance_today(&self) -> ClientResult<Vec<AttendanceRecord>> {
        self.get("/api/attendance/today").await
    }

    // ========== Salary API ==========

    /// Employees eligible for salary processing
    pub async fn salary_employee_selection(&self) -> ClientResult<EmployeeSelectionResponse> {
        self.get("/api/salary/employee-selection").await
    }

    /// Channel catalog plus the backend's default selection, fetched once at
    /// workflow start
    pub async fn communication_channels(&self) -> ClientResult<ChannelCatalogResponse> {
        self.get("/api/salary/communication-channels").await
    }

    /// Compute the salary breakdown for `(employee_id, year, month)`.
    /// Idempotent for stable attendance records.
    pub async fn calculate_salary(
        &self,
        request: &SalaryCalculationRequest,
    ) -> ClientResult<CalculateSalaryResponse> {
        self.post(
            &format!("/api/employees/{}/calculate-salary", request.employee_id),
            request,
        )
        .await
    }

    /// Generate the payslip document and decode it into bytes.
    /// Nothing is saved on failure; the server-provided filename is preserved.
    pub async fn generate_salary_slip(
        &self,
        request: &SalaryCalculationRequest,
    ) -> ClientResult<PayslipFile> {
        let response: SalarySlipResponse = self
            .post(
                &format!("/api/employees/{}/generate-salary-slip", request.employee_id),
                request,
            )
            .await?;
        PayslipFile::decode(&response)
    }

    /// Generate the payslip server-side and fan it out over the selected
    /// channels. Partial failure is reported in the response, not as an error.
    pub async fn generate_and_share_salary_slip(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
        channels: Vec<ChannelId>,
    ) -> ClientResult<ShareSalarySlipResponse> {
        let request = ShareSalarySlipRequest {
            employee_id: employee_id.to_string(),
            year,
            month,
            channels,
        };
        self.post(
            &format!(
                "/api/employees/{}/generate-and-share-salary-slip",
                employee_id
            ),
            &request,
        )
        .await
    }

    // ========== Document API ==========

    /// Documents stored for one employee
    pub async fn employee_documents(&self, employee_id: &str) -> ClientResult<Vec<Document>> {
        self.get(&format!("/api/employees/{}/documents", employee_id))
            .await
    }

    /// Fixed list of accepted document categories
    pub async fn document_types(&self) -> ClientResult<DocumentTypesResponse> {
        self.get("/api/documents/types").await
    }

    /// Upload a document for one employee
    pub async fn upload_document(
        &self,
        employee_id: &str,
        request: &DocumentUploadRequest,
    ) -> ClientResult<Document> {
        self.post(&format!("/api/employees/{}/documents", employee_id), request)
            .await
    }

    // ========== Announcement API ==========

    /// List company announcements
    pub async fn announcements(&self) -> ClientResult<Vec<Announcement>> {
        self.get("/api/announcements").await
    }

    /// Publish an announcement
    pub async fn create_announcement(
        &self,
        request: &AnnouncementCreate,
    ) -> ClientResult<Announcement> {
        self.post("/api/announcements", request).await
    }

    /// Delete an announcement
    pub async fn delete_announcement(&self, id: &str) -> ClientResult<serde_json::Value> {
        self.delete(&format!("/api/announcements/{}", id)).await
    }
}
