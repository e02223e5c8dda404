//! MEDICAL_VISIT_CANCELLED: cancellation of a visit originated by medical
//! staff or RH.

use oshapp_entity::notification::{NotificationActor, NotificationScenario};

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// Visit cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitCancelledStrategy;

impl VisitCancelledStrategy {
    fn when(ctx: &RecipientContext<'_>) -> String {
        let appt = ctx.appointment();
        format::date_time(
            appt.scheduled_time
                .or(appt.proposed_date)
                .or(appt.requested_date_employee),
        )
    }

    /// The employee cancelled.
    fn by_employee(ctx: &RecipientContext<'_>) -> String {
        let when = Self::when(ctx);
        let kind = ctx.type_text();
        let mode = ctx.mode_text();
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let visit = if ctx.obligatory() {
            "la visite médicale obligatoire"
        } else {
            "la visite médicale"
        };
        let initiated = ctx.employee_initiated();

        match ctx.kind() {
            RecipientKind::Employee => {
                let lead = if initiated {
                    format!("Vous avez annulé votre demande de visite médicale ({kind}) du {when}")
                } else {
                    format!("Vous avez annulé {visit} ({kind}) proposée par le service médical le {when}")
                };
                format!(
                    "{lead}{SEP}Modalité : {mode}{}{SEP}Statut : Annulé.",
                    ctx.instructions_part()
                )
            }
            RecipientKind::Restricted => {
                let lead = if initiated {
                    format!("L'employé [{who}] a annulé sa demande de visite médicale ({kind}) du {when}")
                } else {
                    format!("L'employé [{who}] a annulé {visit} ({kind}) proposée par le service médical le {when}")
                };
                format!("{lead}{SEP}Modalité : {mode}{SEP}Statut : Annulé.")
            }
            RecipientKind::Medical => {
                let lead = if initiated {
                    format!("L'employé [{who}] a annulé sa demande de visite médicale ({kind}) du {when}")
                } else {
                    format!("L'employé [{who}] a annulé {visit} ({kind}) que vous aviez proposée le {when}")
                };
                format!(
                    "{lead}{SEP}Modalité : {mode}{}{SEP}Statut : Annulé.",
                    ctx.instructions_part()
                )
            }
        }
    }

    /// Medical staff or RH cancelled.
    fn by_service(ctx: &RecipientContext<'_>, service: &str) -> String {
        let when = Self::when(ctx);
        let kind = ctx.type_text();
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());

        match ctx.kind() {
            RecipientKind::Employee => format!(
                "{service} a annulé votre visite médicale ({kind}) du {when}{SEP}Statut : Annulé."
            ),
            _ if ctx.is_actor() => format!(
                "Vous avez annulé la visite médicale ({kind}) de [{who}] du {when}{SEP}Statut : Annulé."
            ),
            _ => format!(
                "{service} a annulé la visite médicale ({kind}) de l'employé [{who}] du {when}{SEP}Statut : Annulé."
            ),
        }
    }

    fn message(ctx: &RecipientContext<'_>) -> String {
        let base = match ctx.actor() {
            Some(NotificationActor::MedicalStaff) => Self::by_service(ctx, "Le service médical"),
            Some(NotificationActor::Rh) => Self::by_service(ctx, "Le service RH"),
            Some(NotificationActor::Employee) | None => Self::by_employee(ctx),
        };
        format::with_extra(base, ctx.extra())
    }

    fn email(ctx: &RecipientContext<'_>) -> EmailContent {
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let subject = if ctx.obligatory() {
            format!(
                "Annulation{SEP}Visite médicale obligatoire ({}){SEP}{who}",
                ctx.type_text()
            )
        } else {
            format!("Annulation de visite médicale{SEP}{who}")
        };
        match ctx.kind() {
            RecipientKind::Restricted => {
                EmailContent::new(subject, "medical-visit-cancelled-rh-template")
            }
            RecipientKind::Employee => {
                EmailContent::new(subject, "medical-visit-cancelled-employee-template")
                    .primary(Cta::new(ctx.link("view"), "Voir les détails"))
            }
            RecipientKind::Medical => {
                EmailContent::new(subject, "medical-visit-cancelled-medical-template")
                    .primary(Cta::new(ctx.link("view"), "Voir les détails"))
            }
        }
    }
}

impl NotificationStrategy for VisitCancelledStrategy {
    fn name(&self) -> &'static str {
        "visit-cancelled"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        scenario == NotificationScenario::MedicalVisitCancelled
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        NotificationContent::new(
            "Visite médicale annulée",
            Self::message(ctx),
            ctx.link("view"),
        )
        .with_email(Self::email(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::*;
    use oshapp_core::types::id::UserId;
    use oshapp_entity::appointment::{AppointmentStatus, AppointmentType};
    use oshapp_service::DispatchRequest;

    fn cancelled(cast: &Cast, actor: NotificationActor, actor_id: UserId) -> DispatchRequest {
        let mut appt = appointment(cast, AppointmentType::MedicalCall, AppointmentStatus::Cancelled);
        appt.is_obligatory = true;
        appt.proposed_date = at(12, 14);
        request(cast, NotificationScenario::MedicalVisitCancelled, appt)
            .with_actor(actor_id)
            .with_actor_override(Some(actor))
    }

    #[test]
    fn test_employee_cancellation_of_obligatory_visit() {
        let cast = cast();
        let req = cancelled(&cast, NotificationActor::Employee, cast.employee_user.id);

        let rh = compose(&VisitCancelledStrategy, &req, &cast.rh);
        assert_eq!(
            rh.message,
            "L'employé [Sara Alaoui (sara@corp.test)] a annulé la visite médicale obligatoire (À l'appel du médecin) proposée par le service médical le 12/01/2025 14:00 – Modalité : Présentiel – Statut : Annulé."
        );
        let email = rh.email.unwrap();
        assert_eq!(email.template, "medical-visit-cancelled-rh-template");
        assert!(email.subject.starts_with("Annulation – Visite médicale obligatoire"));

        let doctor = compose(&VisitCancelledStrategy, &req, &cast.doctor);
        assert!(doctor.message.contains("que vous aviez proposée"));
        assert!(doctor.message.contains("Consignes : Venir à jeun"));
    }

    #[test]
    fn test_staff_cancellation() {
        let cast = cast();
        let req = cancelled(&cast, NotificationActor::MedicalStaff, cast.nurse.id);
        let employee = compose(&VisitCancelledStrategy, &req, &cast.employee_user);
        assert!(employee.message.starts_with("Le service médical a annulé votre visite médicale"));
        assert_eq!(
            employee.email.unwrap().template,
            "medical-visit-cancelled-employee-template"
        );
        assert!(compose(&VisitCancelledStrategy, &req, &cast.nurse)
            .message
            .starts_with("Vous avez annulé la visite médicale"));
    }
}
