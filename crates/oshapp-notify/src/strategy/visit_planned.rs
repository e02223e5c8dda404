//! MEDICAL_VISIT_PLANNED: medical staff planned a visit directly.

use serde_json::{Map, Value};

use oshapp_entity::notification::NotificationScenario;

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// Visit planned by medical staff.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitPlannedStrategy;

impl VisitPlannedStrategy {
    fn when(ctx: &RecipientContext<'_>) -> String {
        let appt = ctx.appointment();
        format::date_time(appt.scheduled_time.or(appt.proposed_date))
    }

    fn message(ctx: &RecipientContext<'_>) -> String {
        let when = Self::when(ctx);
        let kind = ctx.type_text();
        let mode = ctx.mode_text();
        let who = format::name_dash_email(&ctx.employee_name(), &ctx.employee_email());
        let instructions = ctx.instructions_part();

        let base = match ctx.kind() {
            RecipientKind::Employee => format!(
                "Le service médical vous propose une visite médicale ({kind}) le {when}{SEP}Modalité : {mode}{instructions}{SEP}Statut : En attente."
            ),
            RecipientKind::Restricted => format!(
                "Le service médical a proposé une visite médicale ({kind}) pour [{who}] le {when}{SEP}Modalité : {mode}{SEP}Statut : En attente."
            ),
            RecipientKind::Medical => {
                let lead = if ctx.is_actor() {
                    "Vous avez planifié"
                } else {
                    "Le service médical a planifié"
                };
                format!(
                    "{lead} une visite médicale ({kind}) pour [{who}] le {when}{SEP}Modalité : {mode}{instructions}{SEP}Statut : En attente."
                )
            }
        };
        format::with_extra(base, ctx.extra())
    }

    fn vars(ctx: &RecipientContext<'_>) -> Map<String, Value> {
        let mut vars = Map::new();
        vars.insert("visitTypeText".into(), ctx.type_text().into());
        vars.insert("appointmentDateTime".into(), Self::when(ctx).into());
        vars.insert("visitModeText".into(), ctx.mode_text().into());
        vars.insert("employeeName".into(), ctx.employee_name().into());
        vars.insert("employeeEmail".into(), ctx.employee_email().into());
        if let Some(instructions) = ctx.instructions() {
            vars.insert("medicalInstructions".into(), instructions.into());
        }
        if let Some(phone) = ctx.service_phone() {
            vars.insert("medicalServicePhone".into(), phone.into());
        }
        vars
    }

    fn email(ctx: &RecipientContext<'_>) -> EmailContent {
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let subject = format!("Proposition de visite médicale{SEP}{who}");
        let mut email = match ctx.kind() {
            RecipientKind::Restricted => {
                EmailContent::new(subject, "medical-visit-planned-rh-template")
            }
            RecipientKind::Employee => {
                EmailContent::new(subject, "medical-visit-planned-employee-template")
                    .primary(Cta::new(ctx.link("confirm"), "Répondre"))
                    .secondary(ctx.certificate_cta())
            }
            RecipientKind::Medical => {
                EmailContent::new(subject, "medical-visit-planned-medical-template")
                    .primary(Cta::new(ctx.link("view"), "Voir les détails"))
                    .secondary(ctx.certificate_cta())
            }
        };
        email.vars = Self::vars(ctx);
        email
    }
}

impl NotificationStrategy for VisitPlannedStrategy {
    fn name(&self) -> &'static str {
        "visit-planned"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        scenario == NotificationScenario::MedicalVisitPlanned
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        let action = if ctx.kind() == RecipientKind::Employee {
            "confirm"
        } else {
            "view"
        };
        NotificationContent::new(
            "Proposition de visite médicale",
            Self::message(ctx),
            ctx.link(action),
        )
        .with_email(Self::email(ctx))
    }
}
