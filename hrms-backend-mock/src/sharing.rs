//! Payslip rendering and simulated multi-channel delivery
//!
//! Delivery never touches a real provider: a channel succeeds when the
//! employee has the matching contact detail on file and fails otherwise,
//! so partial failure is reproducible in tests.

use chrono::Utc;
use shared::models::{
    ChannelDelivery, ChannelId, DeliveryStatus, DigitalSignature, EmployeeRecord,
    SalaryCalculation, SharingResults,
};
use std::collections::BTreeMap;

/// `Salary_Slip_{Full_Name}_{year}_{month:02}.pdf` with spaces underscored
pub fn payslip_filename(full_name: &str, year: i32, month: u32) -> String {
    format!(
        "Salary_Slip_{}_{}_{:02}.pdf",
        full_name.replace(' ', "_"),
        year,
        month
    )
}

fn escape_pdf_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Render the breakdown as a single-page PDF document
pub fn render_payslip(calc: &SalaryCalculation) -> Vec<u8> {
    let info = &calc.employee_info;
    let earnings = &calc.earnings;
    let deductions = &calc.deductions;

    let lines = [
        format!("SALARY SLIP - {}", info.calculation_month),
        String::new(),
        format!("Employee: {} ({})", info.employee_name, info.employee_id),
        format!("Department: {}", info.department),
        format!("Designation: {}", info.designation),
        format!(
            "Attendance: {}/{} days ({}%)",
            calc.employee_details.present_days,
            calc.employee_details.total_working_days,
            calc.employee_details.attendance_percentage
        ),
        String::new(),
        format!("Basic Salary: {:.2}", earnings.basic_salary),
        format!("HRA: {:.2}", earnings.hra),
        format!("DA: {:.2}", earnings.da),
        format!("Medical Allowance: {:.2}", earnings.medical_allowance),
        format!("Transport Allowance: {:.2}", earnings.transport_allowance),
        format!("Gross Salary: {:.2}", earnings.gross_salary),
        String::new(),
        format!("PF (Employee): {:.2}", deductions.pf_employee),
        format!("ESI (Employee): {:.2}", deductions.esi_employee),
        format!("Professional Tax: {:.2}", deductions.professional_tax),
        format!("Income Tax: {:.2}", deductions.income_tax),
        format!("Total Deductions: {:.2}", deductions.total_deductions),
        String::new(),
        format!("NET SALARY: {:.2}", calc.net_salary),
    ];

    let mut content = String::from("BT /F1 11 Tf 50 790 Td 14 TL\n");
    for line in &lines {
        content.push_str(&format!("({}) Tj T*\n", escape_pdf_text(line)));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Courier >>".to_string(),
        format!("<< /Length {} >>\nstream\n{}endstream", content.len(), content),
    ];

    let mut pdf: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}

/// Simulate one delivery attempt
pub fn deliver(employee: &EmployeeRecord, channel: ChannelId) -> ChannelDelivery {
    match channel {
        ChannelId::Email => {
            if employee.email_address.is_empty() {
                failure("No email address on file")
            } else {
                success(
                    format!("Salary slip sent to {}", employee.email_address),
                    &employee.email_address,
                )
            }
        }
        ChannelId::Whatsapp => {
            if employee.contact_number.is_empty() {
                failure("No contact number on file")
            } else {
                success(
                    format!("Salary slip sent via WhatsApp to {}", employee.contact_number),
                    &employee.contact_number,
                )
            }
        }
        ChannelId::Sms => {
            if employee.contact_number.is_empty() {
                failure("No contact number on file")
            } else {
                success(
                    format!("Download link sent via SMS to {}", employee.contact_number),
                    &employee.contact_number,
                )
            }
        }
    }
}

fn success(message: String, recipient: &str) -> ChannelDelivery {
    ChannelDelivery {
        status: DeliveryStatus::Success,
        message,
        recipient: Some(recipient.to_string()),
    }
}

fn failure(message: &str) -> ChannelDelivery {
    ChannelDelivery {
        status: DeliveryStatus::Failure,
        message: message.to_string(),
        recipient: None,
    }
}

/// Fan the slip out over the requested channels and aggregate the outcomes
pub fn share(employee: &EmployeeRecord, channels: &[ChannelId]) -> SharingResults {
    let mut results = BTreeMap::new();
    let mut successful = Vec::new();
    let mut failed = Vec::new();

    for &channel in channels {
        let delivery = deliver(employee, channel);
        match delivery.status {
            DeliveryStatus::Success => successful.push(channel),
            DeliveryStatus::Failure => failed.push(channel),
        }
        results.insert(channel, delivery);
    }

    SharingResults {
        successful_channels: successful,
        failed_channels: failed,
        results,
    }
}

/// Authorization block attached to every shared slip
pub fn signature(employee_id: &str, year: i32, month: u32) -> DigitalSignature {
    DigitalSignature {
        signed_by: "Priya Menon".to_string(),
        designation: "HR Manager".to_string(),
        authority: "Meridian Consulting Pvt Ltd".to_string(),
        verification_code: format!("VRF-{}-{:02}-{}", year, month, employee_id),
        contact_verification: "hr@example.com".to_string(),
        signature_date: Utc::now().format("%Y-%m-%d").to_string(),
    }
}
