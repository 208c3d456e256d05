//! Session value
//!
//! Created on login, passed down explicitly to whatever needs it, destroyed
//! on logout. Never a global: token invalidation is not detected client-side,
//! a stale token simply makes the next request fail with `Unauthorized`.

use serde::{Deserialize, Serialize};
use shared::api::LoginResponse;
use shared::models::EmployeeSummary;

/// Authenticated session: the logged-in user plus their bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: EmployeeSummary,
    pub token: String,
}

impl Session {
    pub fn from_login(response: &LoginResponse) -> Self {
        Self {
            user: EmployeeSummary::from(&response.employee),
            token: response.access_token.clone(),
        }
    }
}
