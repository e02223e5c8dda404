//! Request context carrying the authenticated user and their roles.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oshapp_core::types::id::{EmployeeId, UserId};
use oshapp_entity::user::{Employee, Role, User};

/// Context for the current authenticated request.
///
/// Built by the caller's authentication layer and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Roles held at request time.
    pub roles: BTreeSet<Role>,
    /// The employee profile linked to the user, if any.
    pub employee_id: Option<EmployeeId>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
            employee_id: None,
            request_time: Utc::now(),
        }
    }

    /// Context for a directory user, optionally linked to their profile.
    pub fn for_user(user: &User, employee: Option<&Employee>) -> Self {
        Self {
            user_id: user.id,
            roles: user.roles.clone(),
            employee_id: employee.map(|e| e.id),
            request_time: Utc::now(),
        }
    }

    /// Attach the linked employee profile.
    pub fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Whether the user holds the role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Returns whether the current user is RH.
    pub fn is_rh(&self) -> bool {
        self.has_role(Role::Rh)
    }

    /// Returns whether the current user is a nurse or a doctor.
    pub fn is_medical_staff(&self) -> bool {
        self.roles.iter().any(Role::is_medical)
    }

    /// Whether EMPLOYEE is the only role held.
    pub fn is_employee_only(&self) -> bool {
        self.roles.len() == 1 && self.has_role(Role::Employee)
    }

    /// Whether the user owns the given employee profile.
    pub fn owns(&self, employee: &Employee) -> bool {
        employee.user_id == self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_helpers() {
        let ctx = RequestContext::new(UserId::new(), [Role::Employee, Role::Nurse]);
        assert!(ctx.is_medical_staff());
        assert!(!ctx.is_rh());
        assert!(!ctx.is_employee_only());

        let plain = RequestContext::new(UserId::new(), [Role::Employee]);
        assert!(plain.is_employee_only());
    }

    #[test]
    fn test_for_user_links_profile() {
        let user = User::new("e@corp.test", [Role::Employee]);
        let employee = Employee::new(user.id, "Sara", "Alaoui");
        let ctx = RequestContext::for_user(&user, Some(&employee));
        assert_eq!(ctx.employee_id, Some(employee.id));
        assert!(ctx.owns(&employee));
    }
}
