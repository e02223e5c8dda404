//! MEDICAL_VISIT_CONFIRMED_BY_EMPLOYEE: the employee accepted a proposed
//! or planned visit.

use oshapp_entity::notification::NotificationScenario;

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// Visit confirmed by the employee.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitConfirmedStrategy;

impl VisitConfirmedStrategy {
    fn message(ctx: &RecipientContext<'_>) -> String {
        let when = format::date_time(ctx.appointment().scheduled_time);
        let kind = ctx.type_text();
        let mode = ctx.mode_text();
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let visit = if ctx.obligatory() {
            "la visite médicale obligatoire"
        } else {
            "la visite médicale"
        };
        let initiated = ctx.employee_initiated();

        let base = match ctx.kind() {
            RecipientKind::Employee => {
                let lead = if initiated {
                    format!("Vous avez confirmé votre demande de visite médicale ({kind}) du {when}")
                } else {
                    format!("Vous avez confirmé {visit} ({kind}) proposée par le service médical le {when}")
                };
                format!(
                    "{lead}{SEP}Modalité : {mode}{}{SEP}Statut : Confirmé.",
                    ctx.instructions_part()
                )
            }
            RecipientKind::Restricted => {
                let lead = if initiated {
                    format!("L'employé [{who}] a confirmé sa demande de visite médicale ({kind}) le {when}")
                } else {
                    format!("L'employé [{who}] a confirmé {visit} ({kind}) proposée par le service médical le {when}")
                };
                format!("{lead}{SEP}Modalité : {mode}{SEP}Statut : Confirmé.")
            }
            RecipientKind::Medical => {
                let lead = if initiated {
                    format!("L'employé [{who}] a confirmé sa demande de visite médicale ({kind}) du {when}")
                } else {
                    format!("L'employé [{who}] a confirmé {visit} ({kind}) que vous aviez proposée le {when}")
                };
                format!(
                    "{lead}{SEP}Modalité : {mode}{}{SEP}Statut : Confirmé.",
                    ctx.instructions_part()
                )
            }
        };
        format::with_extra(base, ctx.extra())
    }

    fn email(ctx: &RecipientContext<'_>) -> EmailContent {
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let kind = ctx.type_text();
        let lead = match (ctx.is_restricted(), ctx.obligatory()) {
            (true, true) => format!("Rendez-vous confirmé{SEP}Visite médicale obligatoire ({kind})"),
            (true, false) => "Rendez-vous confirmé".to_string(),
            (false, true) => format!("Confirmation{SEP}Visite médicale obligatoire ({kind})"),
            (false, false) => "Confirmation de visite médicale".to_string(),
        };
        let subject = format!("{lead}{SEP}{who}");

        let template = match ctx.kind() {
            RecipientKind::Restricted => {
                return EmailContent::new(subject, "medical-visit-confirmed-rh-template");
            }
            RecipientKind::Employee => "medical-visit-confirmed-employee-template",
            RecipientKind::Medical => "medical-visit-confirmed-medical-template",
        };
        EmailContent::new(subject, template)
            .primary(Cta::new(ctx.link("view"), "Voir les détails"))
            .secondary(ctx.certificate_cta())
            .var("visitTypeText", kind)
            .var(
                "appointmentDateTime",
                format::date_time(ctx.appointment().scheduled_time),
            )
            .var("visitModeText", ctx.mode_text())
    }
}

impl NotificationStrategy for VisitConfirmedStrategy {
    fn name(&self) -> &'static str {
        "visit-confirmed"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        scenario == NotificationScenario::MedicalVisitConfirmedByEmployee
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        NotificationContent::new(
            "Visite médicale confirmée",
            Self::message(ctx),
            ctx.link("view"),
        )
        .with_email(Self::email(ctx))
    }
}
