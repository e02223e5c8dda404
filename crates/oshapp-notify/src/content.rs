//! Composed notification content for one recipient.

use serde::Serialize;
use serde_json::{Map, Value};

/// A call-to-action button in an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cta {
    /// Target URL.
    pub url: String,
    /// Button label; the gateway substitutes a default when absent.
    pub label: Option<String>,
}

impl Cta {
    /// A labelled button.
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: Some(label.into()),
        }
    }

    /// A button with the default label.
    pub fn unlabelled(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
        }
    }
}

/// Email part of a notification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailContent {
    /// Subject line.
    pub subject: String,
    /// Template name.
    pub template: String,
    /// Main button.
    pub primary: Option<Cta>,
    /// Secondary button.
    pub secondary: Option<Cta>,
    /// Template variables beyond the appointment defaults.
    pub vars: Map<String, Value>,
}

impl EmailContent {
    /// Email with no button.
    pub fn new(subject: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            template: template.into(),
            ..Default::default()
        }
    }

    /// Set the main button.
    pub fn primary(mut self, cta: Cta) -> Self {
        self.primary = Some(cta);
        self
    }

    /// Set the secondary button, if any.
    pub fn secondary(mut self, cta: Option<Cta>) -> Self {
        self.secondary = cta;
        self
    }

    /// Add a template variable.
    pub fn var(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }
}

/// Everything one recipient receives for one event.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationContent {
    /// In-app title.
    pub title: String,
    /// In-app message.
    pub message: String,
    /// In-app deep link.
    pub action_url: String,
    /// Email to send, if any.
    pub email: Option<EmailContent>,
}

impl NotificationContent {
    /// In-app content with no email.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        action_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action_url: action_url.into(),
            email: None,
        }
    }

    /// Attach an email.
    pub fn with_email(mut self, email: EmailContent) -> Self {
        self.email = Some(email);
        self
    }
}
