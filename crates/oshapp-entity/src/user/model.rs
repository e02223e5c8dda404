//! User entity model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use oshapp_core::types::id::UserId;

use super::role::Role;

/// A platform account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address; may be blank for accounts without a mailbox.
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Granted roles.
    pub roles: BTreeSet<Role>,
    /// Professional phone number.
    pub phone: Option<String>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub active: bool,
}

impl User {
    /// Create an active user with the given roles.
    pub fn new(email: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name: None,
            roles: roles.into_iter().collect(),
            phone: None,
            active: true,
        }
    }

    /// Builder-style display name setter.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder-style phone setter.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Check whether the user holds a role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Nurse or doctor.
    pub fn is_medical_staff(&self) -> bool {
        self.roles.iter().any(Role::is_medical)
    }

    /// Holds the RH role.
    pub fn is_rh(&self) -> bool {
        self.has_role(Role::Rh)
    }

    /// Holds the ADMIN role.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Holds NURSE, DOCTOR or RH.
    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(Role::is_privileged)
    }

    /// Holds no role other than EMPLOYEE.
    pub fn is_employee_only(&self) -> bool {
        self.roles.iter().all(|r| *r == Role::Employee)
    }

    /// Whether the email address can receive mail.
    pub fn has_mailbox(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Display name, falling back to the email address.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}

fn default_true() -> bool {
    true
}
