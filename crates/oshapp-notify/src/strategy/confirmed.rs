//! APPOINTMENT_CONFIRMED and APPOINTMENT_CONFIRMED_RH.
//!
//! Phrasing depends on who confirmed (the effective actor), who reads, and
//! whether the employee originated the visit.

use oshapp_entity::notification::{NotificationActor, NotificationScenario};

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// Appointment confirmation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmedStrategy;

impl ConfirmedStrategy {
    fn message(ctx: &RecipientContext<'_>) -> String {
        let appt = ctx.appointment();
        let date = appt.scheduled_time.or(appt.proposed_date);
        let when = format::date_time(date);
        let mode = ctx.mode_text();
        let who = format::name_dash_email(&ctx.employee_name(), &ctx.employee_email());
        let initiated = ctx.employee_initiated();
        let confirmed = format!("{SEP}Date confirmée : {when}{SEP}Mode : {mode}{SEP}Statut : Confirmé.");
        let validated = format!("{SEP}Date validée : {when}{SEP}Mode : {mode}{SEP}Statut : Confirmé.");

        match (ctx.actor(), ctx.kind()) {
            (Some(NotificationActor::Employee), RecipientKind::Employee) => {
                if initiated {
                    format!("Vous avez confirmé le créneau proposé pour votre demande de rendez-vous{confirmed}")
                } else {
                    format!("Vous avez confirmé le créneau proposé par le service médical{confirmed}")
                }
            }
            (Some(NotificationActor::Employee), RecipientKind::Restricted) => {
                if initiated {
                    format!("L'employé {who} a confirmé le créneau proposé pour sa demande de rendez-vous{confirmed}")
                } else {
                    format!("L'employé {who} a confirmé le rendez-vous proposé par le service médical{confirmed}")
                }
            }
            (Some(NotificationActor::Employee), RecipientKind::Medical) => {
                if initiated {
                    format!("L'employé {who} a confirmé le créneau proposé pour sa demande{confirmed}")
                } else {
                    format!("L'employé {who} a confirmé le rendez-vous que vous aviez proposé{confirmed}")
                }
            }
            (Some(NotificationActor::Rh), _) => {
                if initiated {
                    format!("Le service médical a confirmé la demande de rendez-vous pour l'employé {who}{validated}")
                } else {
                    format!("Le service médical a confirmé la visite planifiée pour {who}{validated}")
                }
            }
            (_, RecipientKind::Employee) => {
                let (day, time) = format::split_date_time(date);
                let subject = if initiated {
                    "Votre demande de rendez-vous"
                } else {
                    "La visite médicale planifiée"
                };
                format!(
                    "{subject} a été confirmée par le service médical{SEP}Date : {day}{SEP}{time}{SEP}Statut : Confirmé."
                )
            }
            (_, RecipientKind::Medical) if ctx.is_actor() => {
                if initiated {
                    format!("Vous avez confirmé la demande de rendez-vous de {who}{validated}")
                } else {
                    format!("Vous avez confirmé la visite planifiée pour {who}{validated}")
                }
            }
            (_, RecipientKind::Restricted | RecipientKind::Medical) => {
                if initiated {
                    format!("Le service médical a confirmé la demande de rendez-vous de l'employé {who}{validated}")
                } else {
                    format!("Le service médical a confirmé la visite planifiée pour l'employé {who}{validated}")
                }
            }
        }
    }

    fn email(ctx: &RecipientContext<'_>) -> EmailContent {
        let subject = if ctx.actor() == Some(NotificationActor::Employee) {
            format!("Confirmation du créneau proposé{SEP}{}", ctx.employee_name())
        } else {
            "Confirmation de votre rendez-vous médical".to_string()
        };
        let appt = ctx.appointment();
        let date = format::date_time(appt.scheduled_time.or(appt.proposed_date));

        match ctx.kind() {
            RecipientKind::Restricted => {
                EmailContent::new(subject, "appointment-confirmation-rh-template")
            }
            kind => {
                let template = if kind == RecipientKind::Medical {
                    "appointment-confirmation-medical-template"
                } else {
                    "appointment-confirmation-template"
                };
                EmailContent::new(subject, template)
                    .primary(Cta::new(ctx.link("view"), "Voir le rendez-vous"))
                    .secondary(ctx.certificate_cta())
                    .var("appointmentDateTime", date)
                    .var("visitModeText", ctx.mode_text())
                    .var("visitTypeText", ctx.type_text())
            }
        }
    }
}

impl NotificationStrategy for ConfirmedStrategy {
    fn name(&self) -> &'static str {
        "confirmed"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        matches!(
            scenario,
            NotificationScenario::AppointmentConfirmed | NotificationScenario::AppointmentConfirmedRh
        )
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        let message = match ctx.extra() {
            Some(extra) => extra.to_string(),
            None => Self::message(ctx),
        };
        NotificationContent::new("Rendez-vous confirmé", message, ctx.link("view"))
            .with_email(Self::email(ctx))
    }
}
