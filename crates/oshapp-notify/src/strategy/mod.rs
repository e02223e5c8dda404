//! Notification strategies: one per scenario, each turning a dispatch
//! request into per-recipient content.
//!
//! Strategies are pure. They never touch storage or the mail transport;
//! the router persists what they compose and hands the email part to the
//! gateway. Restricted fields are only reachable through
//! [`RecipientContext`], which filters them by the visibility policy, so
//! no strategy can put them in front of RH or a manager.

pub mod cancelled;
pub mod confirmed;
pub mod fallback;
pub mod requested;
pub mod slot_proposed;
pub mod visit_cancelled;
pub mod visit_confirmed;
pub mod visit_planned;

use std::sync::Arc;

use oshapp_entity::appointment::Appointment;
use oshapp_entity::notification::{NotificationActor, NotificationScenario};
use oshapp_entity::user::{Employee, User};
use oshapp_service::{DispatchRequest, VisibilityPolicy};

use crate::content::{Cta, NotificationContent};
use crate::format;

pub use cancelled::CancelledStrategy;
pub use confirmed::ConfirmedStrategy;
pub use fallback::FallbackStrategy;
pub use requested::RequestedStrategy;
pub use slot_proposed::SlotProposedStrategy;
pub use visit_cancelled::VisitCancelledStrategy;
pub use visit_confirmed::VisitConfirmedStrategy;
pub use visit_planned::VisitPlannedStrategy;

/// Composes notification content for one scenario.
pub trait NotificationStrategy: Send + Sync + std::fmt::Debug + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy handles the scenario.
    fn supports(&self, scenario: NotificationScenario) -> bool;

    /// Build the content for one recipient.
    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent;
}

/// The default strategy table, in lookup order.
pub fn default_strategies() -> Vec<Arc<dyn NotificationStrategy>> {
    vec![
        Arc::new(RequestedStrategy),
        Arc::new(SlotProposedStrategy),
        Arc::new(ConfirmedStrategy),
        Arc::new(CancelledStrategy),
        Arc::new(VisitPlannedStrategy),
        Arc::new(VisitConfirmedStrategy),
        Arc::new(VisitCancelledStrategy),
    ]
}

/// How a recipient relates to the appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientKind {
    /// The employee the appointment is for.
    Employee,
    /// RH, a manager of the employee, or anyone not otherwise classified.
    Restricted,
    /// A nurse or doctor.
    Medical,
}

/// One recipient's view of a dispatch request.
#[derive(Debug, Clone, Copy)]
pub struct RecipientContext<'a> {
    request: &'a DispatchRequest,
    recipient: &'a User,
    base_url: &'a str,
}

impl<'a> RecipientContext<'a> {
    /// Bind a request to a recipient.
    pub fn new(request: &'a DispatchRequest, recipient: &'a User, base_url: &'a str) -> Self {
        Self {
            request,
            recipient,
            base_url,
        }
    }

    /// The dispatch request.
    pub fn request(&self) -> &'a DispatchRequest {
        self.request
    }

    /// The recipient.
    pub fn recipient(&self) -> &'a User {
        self.recipient
    }

    /// The appointment snapshot.
    pub fn appointment(&self) -> &'a Appointment {
        &self.request.appointment
    }

    /// The employee the appointment is for.
    pub fn employee(&self) -> &'a Employee {
        &self.request.employee
    }

    /// Classify the recipient. The employee wins, then the restricted
    /// audience, then medical staff.
    pub fn kind(&self) -> RecipientKind {
        let employee = self.employee();
        if VisibilityPolicy::is_employee_recipient(self.recipient, employee) {
            RecipientKind::Employee
        } else if VisibilityPolicy::is_restricted_audience(self.recipient, employee) {
            RecipientKind::Restricted
        } else if VisibilityPolicy::is_medical_staff(self.recipient) {
            RecipientKind::Medical
        } else {
            RecipientKind::Restricted
        }
    }

    /// Whether the recipient is RH or a manager of the employee.
    pub fn is_restricted(&self) -> bool {
        self.kind() == RecipientKind::Restricted
    }

    /// Whether the recipient performed the transition.
    pub fn is_actor(&self) -> bool {
        self.request.is_actor(self.recipient.id)
    }

    /// The effective actor of the scenario.
    pub fn actor(&self) -> Option<NotificationActor> {
        self.request.actor()
    }

    /// Whether the employee originated the visit.
    pub fn employee_initiated(&self) -> bool {
        format::is_employee_initiated(self.appointment(), self.employee())
    }

    /// Whether RH made the visit mandatory.
    pub fn obligatory(&self) -> bool {
        self.appointment().is_obligatory
    }

    /// Non-blank extra message.
    pub fn extra(&self) -> Option<&'a str> {
        self.request
            .extra_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Employee display name.
    pub fn employee_name(&self) -> String {
        format::employee_name(self.employee(), self.request.employee_user.as_ref())
    }

    /// Employee account email, possibly empty.
    pub fn employee_email(&self) -> String {
        format::employee_email(self.request.employee_user.as_ref())
    }

    /// Short visit type label.
    pub fn type_text(&self) -> &'static str {
        self.appointment().kind.label()
    }

    /// Visit mode text.
    pub fn mode_text(&self) -> &'static str {
        format::mode_text(self.appointment().visit_mode)
    }

    /// Motif, when the recipient may see it.
    pub fn motif(&self) -> Option<&'a str> {
        self.appointment()
            .motif
            .as_deref()
            .filter(|_| VisibilityPolicy::can_see_motif(self.recipient, self.employee()))
    }

    /// Notes, when the recipient may see them.
    pub fn notes(&self) -> Option<&'a str> {
        self.appointment()
            .notes
            .as_deref()
            .filter(|_| VisibilityPolicy::can_see_motif(self.recipient, self.employee()))
    }

    /// Medical instructions, when the recipient may see them.
    pub fn instructions(&self) -> Option<&'a str> {
        self.appointment()
            .medical_instructions
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .filter(|_| VisibilityPolicy::can_see_private(self.recipient, self.employee()))
    }

    /// Medical service phone, when the recipient may see it.
    pub fn service_phone(&self) -> Option<&'a str> {
        self.appointment()
            .medical_service_phone
            .as_deref()
            .filter(|_| VisibilityPolicy::can_see_private(self.recipient, self.employee()))
    }

    /// Deep link for an action on the appointment.
    pub fn link(&self, action: &str) -> String {
        format::action_link(self.base_url, self.appointment(), action)
    }

    /// "Voir le certificat" button for return-to-work visits.
    pub fn certificate_cta(&self) -> Option<Cta> {
        self.appointment()
            .kind
            .has_certificate()
            .then(|| Cta::new(self.link("certificate"), "Voir le certificat"))
    }

    /// `" – Consignes : ..."` when instructions are visible, else empty.
    pub fn instructions_part(&self) -> String {
        self.instructions()
            .map(|i| format!("{}Consignes : {i}", format::SEP))
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the strategy tests.

    use chrono::NaiveDate;

    use oshapp_entity::appointment::{AppointmentStatus, AppointmentType, VisitMode};
    use oshapp_entity::notification::ScenarioTag;
    use oshapp_entity::user::Role;

    use super::*;

    pub const BASE: &str = "http://localhost:3000";

    /// Cast of a typical dispatch.
    pub struct Cast {
        pub employee_user: User,
        pub employee: Employee,
        pub manager: User,
        pub rh: User,
        pub nurse: User,
        pub doctor: User,
    }

    pub fn cast() -> Cast {
        let employee_user = User::new("sara@corp.test", [Role::Employee]);
        let manager = User::new("karim@corp.test", [Role::Employee]);
        let employee = Employee::new(employee_user.id, "Sara", "Alaoui")
            .with_managers(Some(manager.id), None);
        Cast {
            employee_user,
            employee,
            manager,
            rh: User::new("rh@corp.test", [Role::Rh]),
            nurse: User::new("nurse@corp.test", [Role::Nurse]),
            doctor: User::new("doctor@corp.test", [Role::Doctor]),
        }
    }

    pub fn at(day: u32, hour: u32) -> Option<chrono::NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 1, day).and_then(|d| d.and_hms_opt(hour, 0, 0))
    }

    pub fn appointment(cast: &Cast, kind: AppointmentType, status: AppointmentStatus) -> Appointment {
        let mut appt = Appointment::new(cast.employee.id, kind, status, cast.employee_user.id);
        appt.requested_date_employee = at(10, 9);
        appt.visit_mode = Some(VisitMode::InPerson);
        appt.motif = Some("Douleurs dorsales".into());
        appt.notes = Some("Depuis lundi".into());
        appt.medical_instructions = Some("Venir à jeun".into());
        appt.medical_service_phone = Some("+212 600 000 000".into());
        appt
    }

    pub fn request(
        cast: &Cast,
        scenario: impl Into<ScenarioTag>,
        appointment: Appointment,
    ) -> DispatchRequest {
        let recipients = vec![
            cast.employee_user.clone(),
            cast.manager.clone(),
            cast.rh.clone(),
            cast.nurse.clone(),
            cast.doctor.clone(),
        ];
        DispatchRequest::new(scenario, appointment, cast.employee.clone(), recipients)
            .with_employee_user(Some(cast.employee_user.clone()))
    }

    pub fn compose(
        strategy: &dyn NotificationStrategy,
        request: &DispatchRequest,
        recipient: &User,
    ) -> NotificationContent {
        strategy.compose(&RecipientContext::new(request, recipient, BASE))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use oshapp_entity::appointment::{AppointmentStatus, AppointmentType};

    #[test]
    fn test_every_scenario_has_exactly_one_strategy() {
        let table = default_strategies();
        for scenario in NotificationScenario::ALL {
            let count = table.iter().filter(|s| s.supports(scenario)).count();
            assert_eq!(count, 1, "{scenario} is handled by {count} strategies");
        }
    }

    #[test]
    fn test_recipient_classification() {
        let cast = cast();
        let appt = appointment(&cast, AppointmentType::Spontaneous, AppointmentStatus::Confirmed);
        let req = request(&cast, NotificationScenario::AppointmentConfirmed, appt);

        let kind = |u: &User| RecipientContext::new(&req, u, BASE).kind();
        assert_eq!(kind(&cast.employee_user), RecipientKind::Employee);
        assert_eq!(kind(&cast.manager), RecipientKind::Restricted);
        assert_eq!(kind(&cast.rh), RecipientKind::Restricted);
        assert_eq!(kind(&cast.nurse), RecipientKind::Medical);
        assert_eq!(kind(&cast.doctor), RecipientKind::Medical);
    }

    #[test]
    fn test_restricted_fields_are_filtered() {
        let cast = cast();
        let appt = appointment(&cast, AppointmentType::Spontaneous, AppointmentStatus::Confirmed);
        let req = request(&cast, NotificationScenario::AppointmentConfirmed, appt);

        for user in [&cast.rh, &cast.manager] {
            let ctx = RecipientContext::new(&req, user, BASE);
            assert!(ctx.motif().is_none());
            assert!(ctx.notes().is_none());
            assert!(ctx.instructions().is_none());
            assert!(ctx.service_phone().is_none());
            assert_eq!(ctx.instructions_part(), "");
        }

        let ctx = RecipientContext::new(&req, &cast.nurse, BASE);
        assert_eq!(ctx.motif(), Some("Douleurs dorsales"));
        assert_eq!(ctx.instructions(), Some("Venir à jeun"));
    }

    #[test]
    fn test_certificate_cta_only_for_return_to_work() {
        let cast = cast();
        let appt = appointment(&cast, AppointmentType::ReturnToWork, AppointmentStatus::Confirmed);
        let req = request(&cast, NotificationScenario::AppointmentConfirmed, appt);
        let ctx = RecipientContext::new(&req, &cast.employee_user, BASE);
        let cta = ctx.certificate_cta().unwrap();
        assert!(cta.url.ends_with("&action=certificate"));

        let appt = appointment(&cast, AppointmentType::Periodic, AppointmentStatus::Confirmed);
        let req = request(&cast, NotificationScenario::AppointmentConfirmed, appt);
        let ctx = RecipientContext::new(&req, &cast.employee_user, BASE);
        assert!(ctx.certificate_cta().is_none());
    }
}
