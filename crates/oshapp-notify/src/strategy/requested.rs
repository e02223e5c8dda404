//! APPOINTMENT_REQUESTED: an employee request or an RH mandatory visit.

use oshapp_entity::appointment::AppointmentType;
use oshapp_entity::notification::NotificationScenario;

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// New request or mandatory visit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestedStrategy;

impl RequestedStrategy {
    fn message(ctx: &RecipientContext<'_>) -> String {
        let appt = ctx.appointment();
        let when = format::date_time(appt.requested_date_employee);
        let who = format::name_dash_email(&ctx.employee_name(), &ctx.employee_email());
        let kind = ctx.type_text();

        let base = match (ctx.kind(), ctx.obligatory()) {
            (RecipientKind::Employee, false) => format!(
                "Votre demande de rendez-vous a été envoyée au service médical{SEP}Date souhaitée : {when}{SEP}Statut : En attente."
            ),
            (RecipientKind::Employee, true) => format!(
                "Une visite médicale obligatoire ({kind}) a été créée{SEP}Statut : En attente."
            ),
            (RecipientKind::Restricted, false) => format!(
                "Le service médical a reçu une demande de rendez-vous pour l'employé {who}{SEP}Date souhaitée : {when}{SEP}Statut : En attente."
            ),
            (RecipientKind::Restricted, true) => format!(
                "Une visite médicale obligatoire ({kind}) a été créée pour l'employé {who}{SEP}Statut : En attente."
            ),
            (RecipientKind::Medical, false) => format!(
                "Nouvelle demande de rendez-vous médical{SEP}{who}{SEP}Date souhaitée : {when}{SEP}Motif : {}{SEP}Notes : {}{SEP}Statut : En attente.",
                format::or_none(ctx.motif()),
                format::or_none(ctx.notes()),
            ),
            (RecipientKind::Medical, true) => format!(
                "RH a initié une visite médicale obligatoire ({kind}) pour {who}{SEP}Statut : En attente."
            ),
        };
        format::with_extra(base, ctx.extra())
    }

    fn email(ctx: &RecipientContext<'_>) -> Option<EmailContent> {
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let kind = ctx.type_text();
        let subject = if ctx.obligatory() {
            format!("Visite médicale obligatoire ({kind}){SEP}{who}")
        } else {
            format!("Nouvelle demande de rendez-vous ({kind}){SEP}{who}")
        };

        match ctx.kind() {
            RecipientKind::Employee => None,
            RecipientKind::Restricted => {
                Some(EmailContent::new(subject, "appointment-requested-rh-template"))
            }
            RecipientKind::Medical => {
                let label = if ctx.obligatory()
                    || ctx.appointment().kind == AppointmentType::PreRecruitment
                {
                    "Proposer un créneau"
                } else {
                    "Confirmer ou proposer un créneau"
                };
                Some(
                    EmailContent::new(subject, "appointment-requested-template")
                        .primary(Cta::new(ctx.link("view"), label))
                        .secondary(ctx.certificate_cta())
                        .var("visitTypeText", kind)
                        .var(
                            "requestedDate",
                            format::date_time(ctx.appointment().requested_date_employee),
                        ),
                )
            }
        }
    }
}

impl NotificationStrategy for RequestedStrategy {
    fn name(&self) -> &'static str {
        "requested"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        scenario == NotificationScenario::AppointmentRequested
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        let title = if ctx.kind() == RecipientKind::Employee {
            "Demande envoyée"
        } else {
            "Nouvelle demande de rendez-vous"
        };
        let content = NotificationContent::new(title, Self::message(ctx), ctx.link("view"));
        match Self::email(ctx) {
            Some(email) => content.with_email(email),
            None => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::*;
    use oshapp_entity::appointment::AppointmentStatus;

    #[test]
    fn test_employee_gets_in_app_only() {
        let cast = cast();
        let appt = appointment(&cast, AppointmentType::Spontaneous, AppointmentStatus::RequestedEmployee);
        let req = request(&cast, NotificationScenario::AppointmentRequested, appt);

        let content = compose(&RequestedStrategy, &req, &cast.employee_user);
        assert_eq!(content.title, "Demande envoyée");
        assert!(content.message.contains("Date souhaitée : 10/01/2025 09:00"));
        assert!(content.email.is_none());
    }

    #[test]
    fn test_rh_message_omits_motif_medical_includes_it() {
        let cast = cast();
        let appt = appointment(&cast, AppointmentType::Spontaneous, AppointmentStatus::RequestedEmployee);
        let req = request(&cast, NotificationScenario::AppointmentRequested, appt);

        let rh = compose(&RequestedStrategy, &req, &cast.rh);
        assert!(!rh.message.contains("Douleurs dorsales"));
        assert!(!rh.message.contains("Depuis lundi"));
        let email = rh.email.unwrap();
        assert_eq!(email.template, "appointment-requested-rh-template");
        assert!(email.primary.is_none());

        let nurse = compose(&RequestedStrategy, &req, &cast.nurse);
        assert_eq!(nurse.title, "Nouvelle demande de rendez-vous");
        assert!(nurse.message.contains("Motif : Douleurs dorsales"));
        assert!(nurse.message.contains("Notes : Depuis lundi"));
        let email = nurse.email.unwrap();
        assert_eq!(email.template, "appointment-requested-template");
        assert_eq!(
            email.primary.unwrap().label.as_deref(),
            Some("Confirmer ou proposer un créneau")
        );
        assert_eq!(
            email.subject,
            "Nouvelle demande de rendez-vous (Spontané) – Sara Alaoui (sara@corp.test)"
        );
    }

    #[test]
    fn test_obligatory_phrasing_and_extra() {
        let cast = cast();
        let mut appt = appointment(&cast, AppointmentType::Periodic, AppointmentStatus::Obligatory);
        appt.is_obligatory = true;
        let req = request(&cast, NotificationScenario::AppointmentRequested, appt)
            .with_extra_message(Some("Merci de répondre rapidement.".into()));

        let doctor = compose(&RequestedStrategy, &req, &cast.doctor);
        assert!(doctor.message.starts_with("RH a initié une visite médicale obligatoire (Périodique)"));
        assert!(doctor.message.ends_with(" – Merci de répondre rapidement."));
        let email = doctor.email.unwrap();
        assert!(email.subject.starts_with("Visite médicale obligatoire (Périodique)"));
        assert_eq!(email.primary.unwrap().label.as_deref(), Some("Proposer un créneau"));
    }
}
