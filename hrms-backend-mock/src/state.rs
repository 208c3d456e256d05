//! Shared server state

use crate::fixtures;
use shared::models::{Announcement, AttendanceRecord, Document, EmployeeRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory state behind the router. Employee records are fixed at startup;
/// attendance, announcements and documents are mutable per process lifetime.
pub struct AppState {
    pub jwt_secret: String,
    pub employees: Vec<EmployeeRecord>,
    pub attendance: RwLock<Vec<AttendanceRecord>>,
    pub announcements: RwLock<Vec<Announcement>>,
    pub documents: RwLock<HashMap<String, Vec<Document>>>,
}

impl AppState {
    /// State seeded with the fixture dataset
    pub fn seeded() -> Self {
        Self {
            jwt_secret: "hrms-mock-secret".to_string(),
            employees: fixtures::employees(),
            attendance: RwLock::new(Vec::new()),
            announcements: RwLock::new(fixtures::announcements()),
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub fn employee(&self, employee_id: &str) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }

    pub fn employee_by_username(&self, username: &str) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.username == username)
    }
}
