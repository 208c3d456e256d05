//! Payslip Sharing Model
//!
//! Per-channel delivery outcome for a distributed salary slip. Partial
//! success (some channels succeed, others fail) is a valid terminal state,
//! not an error.

use crate::models::channel::ChannelId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Success,
    Failure,
}

/// Per-channel delivery detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDelivery {
    pub status: DeliveryStatus,
    pub message: String,
    /// Address/number the delivery targeted, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Aggregated sharing outcome across all attempted channels
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SharingResults {
    pub successful_channels: Vec<ChannelId>,
    pub failed_channels: Vec<ChannelId>,
    pub results: BTreeMap<ChannelId, ChannelDelivery>,
}

impl SharingResults {
    pub fn is_full_success(&self) -> bool {
        self.failed_channels.is_empty() && !self.successful_channels.is_empty()
    }
}

/// Backend-attached metadata asserting who authorized the distributed slip.
/// Not a cryptographic primitive on the client side; rendered verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalSignature {
    pub signed_by: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub authority: String,
    pub verification_code: String,
    #[serde(default)]
    pub contact_verification: String,
    pub signature_date: String,
}
