//! Document Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of document categories accepted by the upload endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    #[serde(rename = "ID Proof")]
    IdProof,
    #[serde(rename = "Address Proof")]
    AddressProof,
    #[serde(rename = "Educational Certificate")]
    EducationalCertificate,
    #[serde(rename = "Experience Letter")]
    ExperienceLetter,
    #[serde(rename = "Salary Certificate")]
    SalaryCertificate,
    #[serde(rename = "Medical Certificate")]
    MedicalCertificate,
    Other,
}

/// Per-employee stored document; immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub employee_id: String,
    pub document_type: DocumentType,
    pub document_name: String,
    /// Size in bytes
    pub file_size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
