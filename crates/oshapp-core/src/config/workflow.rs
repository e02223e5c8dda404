//! Appointment workflow configuration.

use serde::{Deserialize, Serialize};

/// Settings consumed by the appointment state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Phone number shown to employees when no nurse or actor phone is known.
    #[serde(default = "default_fallback_phone")]
    pub fallback_phone: String,
    /// Maximum length of free-text fields (motif, notes, comments, reasons).
    #[serde(default = "default_max_text_length")]
    pub max_text_length: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            fallback_phone: default_fallback_phone(),
            max_text_length: default_max_text_length(),
        }
    }
}

fn default_fallback_phone() -> String {
    "+212 6 XX XX XX XX".to_string()
}

fn default_max_text_length() -> u64 {
    2000
}
