//! Outgoing email message.

use serde::Serialize;
use serde_json::{Map, Value};

use oshapp_core::types::id::AppointmentId;

/// A button with its final label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCta {
    /// Target URL.
    pub url: String,
    /// Button label.
    pub label: String,
}

/// One email, ready for a transport.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Template name.
    pub template: String,
    /// Appointment the email is about.
    pub appointment_id: AppointmentId,
    /// Main button.
    pub primary_cta: Option<ResolvedCta>,
    /// Secondary button.
    pub secondary_cta: Option<ResolvedCta>,
    /// Template variables.
    pub vars: Map<String, Value>,
}

impl EmailMessage {
    /// Whether a template variable is present.
    pub fn has_var(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Whether any rendered field mentions the text.
    pub fn mentions(&self, needle: &str) -> bool {
        self.subject.contains(needle)
            || self
                .vars
                .values()
                .any(|v| v.as_str().is_some_and(|s| s.contains(needle)))
    }
}
