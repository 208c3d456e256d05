//! Payslip decoding and saving
//!
//! The backend returns the generated document base64-encoded in a JSON
//! envelope together with the filename to save it under. The client treats
//! the payload as an opaque blob.

use crate::ClientResult;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::api::SalarySlipResponse;
use std::path::{Path, PathBuf};

/// Decoded payslip document
#[derive(Debug, Clone)]
pub struct PayslipFile {
    /// Server-provided filename, used verbatim when saving
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PayslipFile {
    /// Decode the base64 payload from the response envelope.
    /// Fails without producing a partial file when the payload is malformed.
    pub fn decode(response: &SalarySlipResponse) -> ClientResult<Self> {
        let bytes = STANDARD.decode(response.pdf_data.as_bytes())?;
        Ok(Self {
            filename: response.filename.clone(),
            bytes,
        })
    }

    /// Write the document into `dir` under the server-provided filename and
    /// return the full path.
    pub fn save_into(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!(file = %path.display(), size = self.bytes.len(), "Payslip saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(pdf_data: &str) -> SalarySlipResponse {
        SalarySlipResponse {
            message: "Salary slip generated successfully".to_string(),
            employee_id: "E100".to_string(),
            employee_name: "Asha Rao".to_string(),
            month_year: "March 2025".to_string(),
            pdf_data: pdf_data.to_string(),
            filename: "Salary_Slip_Asha_Rao_2025_03.pdf".to_string(),
        }
    }

    #[test]
    fn decode_keeps_server_filename() {
        let encoded = STANDARD.encode(b"%PDF-1.4 fake");
        let slip = PayslipFile::decode(&envelope(&encoded)).unwrap();
        assert_eq!(slip.filename, "Salary_Slip_Asha_Rao_2025_03.pdf");
        assert_eq!(slip.bytes, b"%PDF-1.4 fake");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(PayslipFile::decode(&envelope("not-base64!!")).is_err());
    }

    #[test]
    fn save_writes_under_server_filename() {
        let dir = tempfile::tempdir().unwrap();
        let encoded = STANDARD.encode(b"content");
        let slip = PayslipFile::decode(&envelope(&encoded)).unwrap();

        let path = slip.save_into(dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Salary_Slip_Asha_Rao_2025_03.pdf"
        );
        assert_eq!(std::fs::read(path).unwrap(), b"content");
    }
}
