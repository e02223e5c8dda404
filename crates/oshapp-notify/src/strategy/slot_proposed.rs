//! APPOINTMENT_SLOT_PROPOSED: medical staff proposed a slot.

use oshapp_entity::notification::NotificationScenario;

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format::{self, SEP};

use super::{NotificationStrategy, RecipientContext, RecipientKind};

/// Slot proposal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotProposedStrategy;

impl SlotProposedStrategy {
    fn message(ctx: &RecipientContext<'_>) -> String {
        let appt = ctx.appointment();
        let proposed = format::date_time(appt.proposed_date);
        let who = format::name_dash_email(&ctx.employee_name(), &ctx.employee_email());
        let kind = ctx.type_text();
        let mode = appt
            .visit_mode
            .map(|m| format!("{SEP}Mode : {}", m.label()))
            .unwrap_or_default();

        match ctx.kind() {
            RecipientKind::Employee => {
                let tag = if ctx.obligatory() {
                    format!(" (Obligatoire{SEP}{kind})")
                } else {
                    String::new()
                };
                format!(
                    "Le service médical vous propose un nouveau créneau{tag}{SEP}{proposed}{mode}{}{SEP}Statut : Créneau proposé.",
                    ctx.instructions_part()
                )
            }
            RecipientKind::Restricted => format!(
                "Le service médical a proposé un nouveau créneau pour l'employé {who}{SEP}Nouvelle proposition : {proposed}{SEP}Statut : Créneau proposé."
            ),
            RecipientKind::Medical => {
                let tag = if ctx.obligatory() {
                    format!(" (Obligatoire{SEP}{kind}{SEP}Initiée par RH)")
                } else {
                    String::new()
                };
                let lead = if ctx.is_actor() {
                    "Vous avez proposé"
                } else {
                    "Le service médical a proposé"
                };
                format!(
                    "{lead} un nouveau créneau{tag} pour {who}{SEP}Nouvelle proposition : {proposed}{mode}{SEP}Statut : En attente de réponse."
                )
            }
        }
    }

    fn email(ctx: &RecipientContext<'_>) -> Option<EmailContent> {
        let who = format::name_with_email(&ctx.employee_name(), &ctx.employee_email());
        let kind = ctx.type_text();
        let subject = if ctx.obligatory() {
            format!("Nouveau créneau proposé{SEP}Visite médicale obligatoire ({kind}){SEP}{who}")
        } else {
            format!("Nouveau créneau proposé ({kind}){SEP}{who}")
        };

        match ctx.kind() {
            RecipientKind::Medical => None,
            RecipientKind::Restricted => {
                Some(EmailContent::new(subject, "appointment-proposal-rh-template"))
            }
            RecipientKind::Employee => Some(
                EmailContent::new(subject, "appointment-proposal-template")
                    .primary(Cta::new(ctx.link("confirm"), "Confirmer le créneau"))
                    .secondary(Some(Cta::new(ctx.link("cancel"), "Refuser la proposition")))
                    .var("visitTypeText", kind)
                    .var(
                        "proposedDate",
                        format::date_time(ctx.appointment().proposed_date),
                    )
                    .var("visitModeText", ctx.mode_text()),
            ),
        }
    }
}

impl NotificationStrategy for SlotProposedStrategy {
    fn name(&self) -> &'static str {
        "slot-proposed"
    }

    fn supports(&self, scenario: NotificationScenario) -> bool {
        scenario == NotificationScenario::AppointmentSlotProposed
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        let message = match ctx.extra() {
            Some(extra) => extra.to_string(),
            None => Self::message(ctx),
        };
        let content = NotificationContent::new("Créneau proposé", message, ctx.link("confirm"));
        match Self::email(ctx) {
            Some(email) => content.with_email(email),
            None => content,
        }
    }
}
