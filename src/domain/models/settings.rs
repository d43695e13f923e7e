use serde::{Deserialize, Serialize};

/// The three independent blocking-rule toggles, loaded from the Rules sheet.
/// Changes take effect on the next evaluation; in-flight operations keep the
/// policy they started with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlockingPolicy {
    /// Display-only: whether days carrying a block still show other
    /// trainers' non-blocking events. Never consulted by the conflict rules.
    pub blocked_allows_visible_events: bool,
    /// When true, only administrators may create or remove blocks.
    pub only_admin_can_block: bool,
    /// When true, duplication silently skips blocked destination days.
    pub blocked_prevents_duplicates: bool,
}

impl Default for BlockingPolicy {
    fn default() -> Self {
        Self {
            blocked_allows_visible_events: true,
            only_admin_can_block: true,
            blocked_prevents_duplicates: true,
        }
    }
}

/// Pre-fill values for event creation forms, from the Defaults sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefaults {
    pub default_type: String,
    pub default_status: String,
    pub default_source: String,
    pub default_medium: String,
    pub default_location: String,
}

impl Default for EventDefaults {
    fn default() -> Self {
        Self {
            default_type: "W".to_string(),
            default_status: "Offered".to_string(),
            default_source: "EQS".to_string(),
            default_medium: "Online".to_string(),
            default_location: "Global".to_string(),
        }
    }
}

/// One entry of a configurable option list (Types, Statuses, Sources,
/// Mediums, Locations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntry {
    pub category: String,
    pub value: String,
    pub active: bool,
}
