//! Communication Channel Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelId {
    Email,
    Whatsapp,
    Sms,
}

impl ChannelId {
    pub const ALL: [ChannelId; 3] = [ChannelId::Email, ChannelId::Whatsapp, ChannelId::Sms];

    /// Wire name, also used as map key in sharing results
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelId::Email => "email",
            ChannelId::Whatsapp => "whatsapp",
            ChannelId::Sms => "sms",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel descriptor from the backend catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunicationChannel {
    pub id: ChannelId,
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub recommended: bool,
}
