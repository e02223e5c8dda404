//! Email delivery configuration.

use serde::{Deserialize, Serialize};

/// Email channel settings. Transport internals live outside this workspace;
/// these values only shape how sends are requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether emails are requested at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Upper bound for a single send attempt, in milliseconds.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
    /// Sender address handed to the transport.
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            send_timeout_ms: default_send_timeout_ms(),
            from_address: default_from_address(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_send_timeout_ms() -> u64 {
    5000
}

fn default_from_address() -> String {
    "no-reply@oshapp.local".to_string()
}
