//! APPOINTMENT_CANCELLED: cancellation of an appointment without medical
//! preparation.

use oshapp_entity::notification::{NotificationActor, NotificationScenario};

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// Appointment cancellation. The extra message is not shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelledStrategy;

impl CancelledStrategy {
    fn message(ctx: &RecipientContext<'_>) -> String {
        let appt = ctx.appointment();
        let when = format::date_time(
            appt.scheduled_time
                .or(appt.proposed_date)
                .or(appt.requested_date_employee),
        );
        let mode = ctx.mode_text();
        let who = format::name_dash_email(&ctx.employee_name(), &ctx.employee_email());
        let initiated = ctx.employee_initiated();
        let status = format!("{SEP}Statut : Annulé.");

        match ctx.actor() {
            Some(NotificationActor::MedicalStaff) => match ctx.kind() {
                RecipientKind::Employee => {
                    format!("Le service médical a annulé votre rendez-vous{SEP}Date : {when}{status}")
                }
                RecipientKind::Medical if ctx.is_actor() => {
                    format!("Vous avez annulé le rendez-vous de {who}{SEP}Date : {when}{status}")
                }
                _ => format!(
                    "Le service médical a annulé le rendez-vous de l'employé {who}{SEP}Date : {when}{status}"
                ),
            },
            Some(NotificationActor::Rh) => match ctx.kind() {
                RecipientKind::Employee => {
                    format!("Les RH ont annulé votre rendez-vous{SEP}Date : {when}{status}")
                }
                _ if ctx.is_actor() => format!(
                    "Vous avez annulé le rendez-vous de l'employé {who}{SEP}Date : {when}{status}"
                ),
                _ => format!(
                    "Les RH ont annulé le rendez-vous de l'employé {who}{SEP}Date : {when}{status}"
                ),
            },
            Some(NotificationActor::Employee) | None => match (ctx.kind(), initiated) {
                (RecipientKind::Employee, true) => format!(
                    "Vous avez annulé votre demande de rendez-vous{SEP}Date demandée : {when}{SEP}Mode : {mode}{status}"
                ),
                (RecipientKind::Employee, false) => format!(
                    "Vous avez annulé le rendez-vous proposé par le service médical{SEP}Date proposée : {when}{SEP}Mode : {mode}{status}"
                ),
                (RecipientKind::Restricted, true) => format!(
                    "L'employé {who} a annulé sa demande de rendez-vous{SEP}Date demandée : {when}{SEP}Mode : {mode}{status}"
                ),
                (RecipientKind::Restricted, false) => format!(
                    "L'employé {who} a annulé le rendez-vous proposé par le service médical{SEP}Date proposée : {when}{SEP}Mode : {mode}{status}"
                ),
                (RecipientKind::Medical, true) => {
                    format!("L'employé {who} a annulé sa demande de rendez-vous{status}")
                }
                (RecipientKind::Medical, false) => {
                    format!("L'employé {who} a annulé le rendez-vous que vous aviez proposé{status}")
                }
            },
        }
    }

    fn email(ctx: &RecipientContext<'_>) -> EmailContent {
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let subject = format!("Annulation ({}){SEP}{who}", ctx.type_text());
        if ctx.is_restricted() {
            EmailContent::new(subject, "appointment-cancellation-rh-template")
        } else {
            EmailContent::new(subject, "appointment-cancellation-medical-template")
                .primary(Cta::new(ctx.link("view"), "Voir les détails"))
                .var("visitTypeText", ctx.type_text())
        }
    }
}

impl NotificationStrategy for CancelledStrategy {
    fn name(&self) -> &'static str {
        "cancelled"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        scenario == NotificationScenario::AppointmentCancelled
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        NotificationContent::new("Rendez-vous annulé", Self::message(ctx), ctx.link("view"))
            .with_email(Self::email(ctx))
    }
}
