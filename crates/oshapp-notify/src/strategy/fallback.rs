//! Generic notices used for legacy topics and unknown scenario names.

use oshapp_entity::notification::{LegacyNotice, NotificationScenario};

use crate::content::{Cta, EmailContent, NotificationContent};
use crate::format;

use super::{NotificationStrategy, RecipientContext};

/// Generic notice. Never selected for a known scenario.
#[derive(Debug, Clone, Copy)]
pub struct FallbackStrategy {
    notice: LegacyNotice,
}

impl FallbackStrategy {
    /// Fallback for the given notice.
    pub fn new(notice: LegacyNotice) -> Self {
        Self { notice }
    }

    /// The notice this fallback sends.
    pub fn notice(&self) -> LegacyNotice {
        self.notice
    }
}

impl NotificationStrategy for FallbackStrategy {
    fn name(&self) -> &'static str {
        match self.notice {
            LegacyNotice::Creation => "fallback-creation",
            LegacyNotice::StatusUpdate => "fallback-status-update",
            LegacyNotice::Obligatory => "fallback-obligatory",
        }
    }

    fn supports(&self, _scenario: NotificationScenario) -> bool {
        false
    }

    fn compose(&self, ctx: &RecipientContext<'_>) -> NotificationContent {
        let appt = ctx.appointment();
        let (title, message, action, subject, label) = match self.notice {
            LegacyNotice::Creation => (
                "Nouveau rendez-vous",
                "Un nouveau rendez-vous a été créé.",
                "view",
                "Nouveau rendez-vous",
                "Ouvrir le rendez-vous",
            ),
            LegacyNotice::StatusUpdate => (
                "Statut mis à jour",
                "Statut mis à jour.",
                "view",
                "Mise à jour de votre rendez-vous",
                "Voir le rendez-vous",
            ),
            LegacyNotice::Obligatory => (
                "Visite médicale obligatoire",
                "Une visite médicale obligatoire a été programmée pour vous. Veuillez confirmer votre disponibilité.",
                "confirm",
                "Visite médicale obligatoire",
                "Confirmer le rendez-vous",
            ),
        };
        let link = ctx.link(action);
        let email = EmailContent::new(format::enrich_subject(subject, appt), "appointment-generic")
            .primary(Cta::new(link.clone(), label));
        NotificationContent::new(title, message, link).with_email(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::*;
    use oshapp_entity::appointment::{AppointmentStatus, AppointmentType};
    use oshapp_entity::notification::ScenarioTag;

    #[test]
    fn test_obligatory_notice_links_to_confirm() {
        let cast = cast();
        let appt = appointment(&cast, AppointmentType::Periodic, AppointmentStatus::Obligatory);
        let req = request(&cast, ScenarioTag::Legacy(LegacyNotice::Obligatory), appt);
        let strategy = FallbackStrategy::new(LegacyNotice::Obligatory);

        let content = compose(&strategy, &req, &cast.employee_user);
        assert_eq!(content.title, "Visite médicale obligatoire");
        assert!(content.action_url.ends_with("&action=confirm"));
        let email = content.email.unwrap();
        assert_eq!(email.subject, "Visite médicale obligatoire – 10/01/2025 09:00");
        assert_eq!(email.template, "appointment-generic");
    }

    #[test]
    fn test_fallback_never_claims_a_scenario() {
        let strategy = FallbackStrategy::new(LegacyNotice::StatusUpdate);
        for scenario in NotificationScenario::ALL {
            assert!(!strategy.supports(scenario));
        }
    }
}
