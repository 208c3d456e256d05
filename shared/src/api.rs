//! API request/response types
//!
//! One explicit type per endpoint payload, shared between the client and the
//! mock backend. Errors travel as `{ "detail": "..." }` with a non-2xx status.

use crate::models::{
    Announcement, AttendanceRecord, ChannelId, CommunicationChannel, DigitalSignature,
    DocumentType, EmployeeRecord, EmployeeSummary, GeoLocation, Priority, SalaryCalculation,
    SharingResults,
};
use serde::{Deserialize, Serialize};

/// Structured error body; `detail` is shown verbatim to the user when present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub employee: EmployeeRecord,
}

// =============================================================================
// Attendance
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub employee_id: String,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEventResponse {
    pub message: String,
    pub record: AttendanceRecord,
}

// =============================================================================
// Salary workflow
// =============================================================================

/// Employees eligible for salary processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSelectionResponse {
    pub employees: Vec<EmployeeSummary>,
}

/// Channel catalog plus the backend-recommended default selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelCatalogResponse {
    pub channels: Vec<CommunicationChannel>,
    pub default_selection: Vec<ChannelId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryCalculationRequest {
    pub employee_id: String,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateSalaryResponse {
    pub message: String,
    pub calculation: SalaryCalculation,
}

/// Generated payslip document, base64-encoded in the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySlipResponse {
    pub message: String,
    pub employee_id: String,
    pub employee_name: String,
    /// Human-readable period, e.g. "March 2025"
    pub month_year: String,
    pub pdf_data: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSalarySlipRequest {
    pub employee_id: String,
    pub year: i32,
    pub month: u32,
    pub channels: Vec<ChannelId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSalarySlipResponse {
    pub message: String,
    pub employee_id: String,
    pub employee_name: String,
    pub year: i32,
    pub month: u32,
    pub channels_attempted: Vec<ChannelId>,
    pub sharing_results: SharingResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_signature: Option<DigitalSignature>,
}

// =============================================================================
// Documents
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUploadRequest {
    pub document_type: DocumentType,
    pub document_name: String,
    /// File content, base64-encoded
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypesResponse {
    pub types: Vec<DocumentType>,
}

// =============================================================================
// Announcements
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementCreate {
    pub title: String,
    pub content: String,
    pub announcement_type: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub target_departments: Vec<String>,
}

pub type AnnouncementListResponse = Vec<Announcement>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryStatus, EmployeeStatus};

    #[test]
    fn channel_id_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&ChannelId::Email).unwrap(), "\"email\"");
        assert_eq!(
            serde_json::from_str::<ChannelId>("\"whatsapp\"").unwrap(),
            ChannelId::Whatsapp
        );
    }

    #[test]
    fn deserialize_employee_summary() {
        let json = r#"{
            "employee_id": "E100",
            "full_name": "Asha Rao",
            "department": "Engineering",
            "designation": "Engineer",
            "email_address": "asha@example.com",
            "contact_number": "+919800000001",
            "basic_salary": 40000.0,
            "status": "Active"
        }"#;
        let summary: EmployeeSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.employee_id, "E100");
        assert_eq!(summary.status, EmployeeStatus::Active);
    }

    #[test]
    fn deserialize_share_response_with_partial_failure() {
        let json = r#"{
            "message": "Salary slip generated and shared",
            "employee_id": "E100",
            "employee_name": "Asha Rao",
            "year": 2025,
            "month": 3,
            "channels_attempted": ["email", "sms"],
            "sharing_results": {
                "successful_channels": ["email"],
                "failed_channels": ["sms"],
                "results": {
                    "email": {"status": "success", "message": "Sent to asha@example.com"},
                    "sms": {"status": "failure", "message": "No contact number on file"}
                }
            },
            "digital_signature": {
                "signed_by": "HR Manager",
                "verification_code": "VRF-2025-0001",
                "signature_date": "2025-03-31"
            }
        }"#;
        let res: ShareSalarySlipResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.sharing_results.successful_channels, vec![ChannelId::Email]);
        assert_eq!(res.sharing_results.failed_channels, vec![ChannelId::Sms]);
        assert_eq!(
            res.sharing_results.results[&ChannelId::Sms].status,
            DeliveryStatus::Failure
        );
        assert!(res.digital_signature.is_some());
    }

    #[test]
    fn missing_optional_signature_is_none() {
        let json = r#"{
            "message": "ok",
            "employee_id": "E1",
            "employee_name": "N",
            "year": 2025,
            "month": 1,
            "channels_attempted": [],
            "sharing_results": {
                "successful_channels": [],
                "failed_channels": [],
                "results": {}
            }
        }"#;
        let res: ShareSalarySlipResponse = serde_json::from_str(json).unwrap();
        assert!(res.digital_signature.is_none());
    }
}
