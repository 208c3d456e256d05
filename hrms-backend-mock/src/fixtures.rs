//! Seeded fixture dataset
//!
//! Deterministic records so integration tests can assert exact figures.
//! All accounts share the password `password123`. E103 has no contact
//! number on file, which makes SMS and WhatsApp delivery fail for her.

use chrono::{TimeZone, Utc};
use shared::models::{Announcement, EmployeeRecord, EmployeeStatus, Priority};

/// Password accepted for every fixture account
pub const PASSWORD: &str = "password123";

fn employee(
    n: u32,
    employee_id: &str,
    full_name: &str,
    department: &str,
    designation: &str,
    contact_number: &str,
    basic_salary: f64,
    username: &str,
) -> EmployeeRecord {
    EmployeeRecord {
        id: format!("emp-{:04}", n),
        employee_id: employee_id.to_string(),
        full_name: full_name.to_string(),
        department: department.to_string(),
        designation: designation.to_string(),
        join_date: Utc.with_ymd_and_hms(2022, 4, 1, 9, 0, 0).unwrap(),
        manager: "Priya Menon".to_string(),
        contact_number: contact_number.to_string(),
        email_address: format!("{}@example.com", username),
        address: "12 MG Road, Bengaluru".to_string(),
        basic_salary,
        status: EmployeeStatus::Active,
        username: username.to_string(),
    }
}

pub fn employees() -> Vec<EmployeeRecord> {
    vec![
        employee(
            1,
            "E100",
            "Asha Rao",
            "Engineering",
            "Senior Engineer",
            "+919800000001",
            40000.0,
            "asha.rao",
        ),
        employee(
            2,
            "E101",
            "Bharat Iyer",
            "Engineering",
            "Engineer",
            "+919800000002",
            30000.0,
            "bharat.iyer",
        ),
        employee(
            3,
            "E102",
            "Chitra Nair",
            "Sales",
            "Account Manager",
            "+919800000003",
            25000.0,
            "chitra.nair",
        ),
        // No contact number: phone-based channels fail for this employee
        employee(
            4,
            "E103",
            "Divya Pillai",
            "Human Resources",
            "HR Executive",
            "",
            12000.0,
            "divya.pillai",
        ),
        employee(
            5,
            "E104",
            "Eshan Gupta",
            "Finance",
            "Accountant",
            "+919800000005",
            18000.0,
            "eshan.gupta",
        ),
    ]
}

pub fn announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: "ann-0001".to_string(),
            title: "Holiday calendar published".to_string(),
            content: "The 2025 holiday calendar is now available on the portal.".to_string(),
            announcement_type: "Holiday".to_string(),
            priority: Priority::Medium,
            published_by: "Priya Menon".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 1, 6, 10, 0, 0).unwrap(),
            valid_until: None,
            target_departments: Vec::new(),
        },
        Announcement {
            id: "ann-0002".to_string(),
            title: "Payroll cutoff moved to the 25th".to_string(),
            content: "Attendance regularization requests must be submitted by the 25th."
                .to_string(),
            announcement_type: "Policy".to_string(),
            priority: Priority::High,
            published_by: "Priya Menon".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap(),
            valid_until: None,
            target_departments: Vec::new(),
        },
    ]
}
