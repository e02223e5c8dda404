//! Visibility policy: who is who on an appointment, and what they may see.
//!
//! Every notification strategy and the appointment projection consult the
//! same rules. RH and line managers form the *restricted audience*: they
//! never receive motif, notes, medical instructions or the medical service
//! phone, in any channel.

use serde_json::{Map, Value};

use oshapp_core::types::id::UserId;
use oshapp_entity::user::{Employee, Role, User};

use crate::context::RequestContext;

/// Template variables that carry medically-restricted content.
pub const RESTRICTED_VARS: [&str; 4] = [
    "medicalInstructions",
    "medicalServicePhone",
    "motif",
    "notes",
];

/// Anything the policy can classify: a request context or a directory user.
pub trait Viewer {
    /// The viewer's user id.
    fn viewer_id(&self) -> UserId;
    /// Whether the viewer holds the role.
    fn holds(&self, role: Role) -> bool;
}

impl Viewer for RequestContext {
    fn viewer_id(&self) -> UserId {
        self.user_id
    }

    fn holds(&self, role: Role) -> bool {
        self.has_role(role)
    }
}

impl Viewer for User {
    fn viewer_id(&self) -> UserId {
        self.id
    }

    fn holds(&self, role: Role) -> bool {
        self.has_role(role)
    }
}

/// Pure visibility rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityPolicy;

impl VisibilityPolicy {
    /// Whether the viewer is RH.
    pub fn is_rh(viewer: &impl Viewer) -> bool {
        viewer.holds(Role::Rh)
    }

    /// Whether the viewer is a nurse or a doctor.
    pub fn is_medical_staff(viewer: &impl Viewer) -> bool {
        viewer.holds(Role::Nurse) || viewer.holds(Role::Doctor)
    }

    /// Whether the viewer is the N+1 or N+2 of the employee.
    pub fn is_manager_for(viewer: &impl Viewer, employee: &Employee) -> bool {
        employee.is_managed_by(viewer.viewer_id())
    }

    /// Whether the viewer is the employee the appointment is for.
    pub fn is_employee_recipient(viewer: &impl Viewer, employee: &Employee) -> bool {
        employee.user_id == viewer.viewer_id()
    }

    /// RH or manager of the employee.
    pub fn is_restricted_audience(viewer: &impl Viewer, employee: &Employee) -> bool {
        Self::is_rh(viewer) || Self::is_manager_for(viewer, employee)
    }

    /// Emails to the restricted audience carry no call-to-action.
    pub fn should_hide_email_cta(viewer: &impl Viewer, employee: &Employee) -> bool {
        Self::is_restricted_audience(viewer, employee)
    }

    /// Motif and notes: hidden from RH and managers who are not medical.
    pub fn can_see_motif(viewer: &impl Viewer, employee: &Employee) -> bool {
        Self::is_medical_staff(viewer) || !Self::is_restricted_audience(viewer, employee)
    }

    /// Medical instructions and service phone: the employee and medical staff.
    pub fn can_see_private(viewer: &impl Viewer, employee: &Employee) -> bool {
        Self::is_employee_recipient(viewer, employee) || Self::is_medical_staff(viewer)
    }

    /// Whether the viewer may open the appointment at all.
    pub fn can_view(viewer: &impl Viewer, employee: &Employee) -> bool {
        Self::is_employee_recipient(viewer, employee)
            || Self::is_medical_staff(viewer)
            || Self::is_rh(viewer)
            || viewer.holds(Role::Admin)
            || Self::is_manager_for(viewer, employee)
    }

    /// ADMIN, RH, NURSE, DOCTOR, the employee and their managers.
    pub fn can_comment(viewer: &impl Viewer, employee: &Employee) -> bool {
        Self::can_view(viewer, employee)
    }

    /// Remove restricted keys from template variables.
    pub fn strip_restricted(vars: &mut Map<String, Value>) {
        for key in RESTRICTED_VARS {
            vars.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn employee_with_manager() -> (User, User, Employee) {
        let owner = User::new("e@corp.test", [Role::Employee]);
        let manager = User::new("m@corp.test", [Role::Employee]);
        let employee =
            Employee::new(owner.id, "Sara", "Alaoui").with_managers(Some(manager.id), None);
        (owner, manager, employee)
    }

    #[test]
    fn test_manager_is_restricted() {
        let (owner, manager, employee) = employee_with_manager();
        assert!(VisibilityPolicy::is_restricted_audience(&manager, &employee));
        assert!(!VisibilityPolicy::can_see_motif(&manager, &employee));
        assert!(!VisibilityPolicy::can_see_private(&manager, &employee));
        assert!(VisibilityPolicy::can_comment(&manager, &employee));

        assert!(!VisibilityPolicy::is_restricted_audience(&owner, &employee));
        assert!(VisibilityPolicy::can_see_private(&owner, &employee));
    }

    #[test]
    fn test_rh_sees_no_medical_fields() {
        let (_, _, employee) = employee_with_manager();
        let rh = User::new("rh@corp.test", [Role::Rh]);
        assert!(VisibilityPolicy::should_hide_email_cta(&rh, &employee));
        assert!(!VisibilityPolicy::can_see_motif(&rh, &employee));
        assert!(!VisibilityPolicy::can_see_private(&rh, &employee));
    }

    #[test]
    fn test_medical_staff_sees_everything() {
        let (_, _, employee) = employee_with_manager();
        let doctor = RequestContext::new(UserId::new(), [Role::Doctor]);
        assert!(VisibilityPolicy::can_see_motif(&doctor, &employee));
        assert!(VisibilityPolicy::can_see_private(&doctor, &employee));
    }

    #[test]
    fn test_outsider_cannot_view() {
        let (_, _, employee) = employee_with_manager();
        let colleague = User::new("c@corp.test", [Role::Employee]);
        assert!(!VisibilityPolicy::can_view(&colleague, &employee));
    }

    #[test]
    fn test_strip_restricted() {
        let mut vars = json!({
            "medicalInstructions": "À jeun",
            "medicalServicePhone": "0600",
            "motif": "Douleurs",
            "notes": "RAS",
            "employeeName": "Sara Alaoui",
        })
        .as_object()
        .cloned()
        .unwrap();
        VisibilityPolicy::strip_restricted(&mut vars);
        assert_eq!(vars.len(), 1);
        assert!(vars.contains_key("employeeName"));
    }
}
