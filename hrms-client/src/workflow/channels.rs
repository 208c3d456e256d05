//! Channel selection set
//!
//! Seeded from the backend-provided default selection, fetched once at
//! workflow start. The only client-side validation is "non-empty";
//! per-channel availability (e.g. no phone number for SMS) is a server-side
//! concern reported back in the per-channel result.

use shared::models::ChannelId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct ChannelSelection {
    selected: BTreeSet<ChannelId>,
}

impl ChannelSelection {
    /// Seed the selection from the backend default
    pub fn seeded(defaults: &[ChannelId]) -> Self {
        Self {
            selected: defaults.iter().copied().collect(),
        }
    }

    /// Toggle membership; toggling twice restores the original set
    pub fn toggle(&mut self, channel: ChannelId) {
        if !self.selected.remove(&channel) {
            self.selected.insert(channel);
        }
    }

    pub fn contains(&self, channel: ChannelId) -> bool {
        self.selected.contains(&channel)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selection in stable order, as sent on the wire
    pub fn to_vec(&self) -> Vec<ChannelId> {
        self.selected.iter().copied().collect()
    }
}
