//! Employee profile entity.

use serde::{Deserialize, Serialize};

use oshapp_core::types::id::{EmployeeId, UserId};

/// HR profile linked to a user account.
///
/// Managers are referenced through their user account, which is what the
/// notification audience and visibility checks compare against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: EmployeeId,
    /// Linked user account.
    pub user_id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Direct manager (N+1) user account.
    pub manager1_id: Option<UserId>,
    /// Second-level manager (N+2) user account.
    pub manager2_id: Option<UserId>,
    /// Professional phone number.
    pub phone: Option<String>,
}

impl Employee {
    /// Create a profile without managers.
    pub fn new(
        user_id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EmployeeId::new(),
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            manager1_id: None,
            manager2_id: None,
            phone: None,
        }
    }

    /// Builder-style manager setter.
    pub fn with_managers(mut self, manager1: Option<UserId>, manager2: Option<UserId>) -> Self {
        self.manager1_id = manager1;
        self.manager2_id = manager2;
        self
    }

    /// "First Last" when both parts are present.
    pub fn full_name(&self) -> Option<String> {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if first.is_empty() || last.is_empty() {
            None
        } else {
            Some(format!("{first} {last}"))
        }
    }

    /// Whether the user manages this employee at either level.
    pub fn is_managed_by(&self, user_id: UserId) -> bool {
        self.manager1_id == Some(user_id) || self.manager2_id == Some(user_id)
    }

    /// Manager user accounts, N+1 first.
    pub fn managers(&self) -> impl Iterator<Item = UserId> + '_ {
        self.manager1_id.into_iter().chain(self.manager2_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_requires_both_parts() {
        let employee = Employee::new(UserId::new(), "Sara", "Alaoui");
        assert_eq!(employee.full_name().as_deref(), Some("Sara Alaoui"));

        let partial = Employee::new(UserId::new(), "Sara", " ");
        assert_eq!(partial.full_name(), None);
    }

    #[test]
    fn test_managers() {
        let m1 = UserId::new();
        let m2 = UserId::new();
        let employee = Employee::new(UserId::new(), "A", "B").with_managers(Some(m1), Some(m2));
        assert!(employee.is_managed_by(m1));
        assert!(employee.is_managed_by(m2));
        assert!(!employee.is_managed_by(employee.user_id));
        assert_eq!(employee.managers().collect::<Vec<_>>(), vec![m1, m2]);
    }
}
