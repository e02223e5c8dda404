//! Notification router: resolves the strategy for a scenario and fans the
//! request out to every recipient.
//!
//! Each recipient is handled independently:
//! - the strategy composes the content;
//! - the in-app row is upserted;
//! - the email, if any, goes through the gateway.
//!
//! A failure for one recipient or one channel is logged and never stops
//! the others. Nothing is reported back to the caller except the
//! [`DispatchReport`] counters.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use oshapp_core::config::{DispatchConfig, NotificationsConfig};
use oshapp_entity::notification::{LegacyNotice, ScenarioTag};
use oshapp_entity::user::User;
use oshapp_service::{DispatchRequest, NotificationService};

use crate::email::{EmailGateway, SendOutcome};
use crate::strategy::{
    FallbackStrategy, NotificationStrategy, RecipientContext, default_strategies,
};

/// Per-dispatch delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Recipients processed.
    pub recipients: usize,
    /// In-app rows written.
    pub in_app_stored: usize,
    /// In-app upserts that failed.
    pub in_app_failed: usize,
    /// Emails handed to the transport.
    pub emails_sent: usize,
    /// Emails deliberately not sent.
    pub emails_skipped: usize,
    /// Emails that failed or timed out.
    pub emails_failed: usize,
}

impl DispatchReport {
    fn record(&mut self, outcome: RecipientOutcome) {
        self.recipients += 1;
        if outcome.stored {
            self.in_app_stored += 1;
        } else {
            self.in_app_failed += 1;
        }
        match outcome.email {
            Some(o) if o.is_sent() => self.emails_sent += 1,
            Some(o) if o.is_skipped() => self.emails_skipped += 1,
            Some(_) => self.emails_failed += 1,
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RecipientOutcome {
    stored: bool,
    email: Option<SendOutcome>,
}

/// Routes dispatch requests to strategies and delivers the result.
#[derive(Debug, Clone)]
pub struct NotificationRouter {
    /// Strategy table, in lookup order.
    strategies: Arc<Vec<Arc<dyn NotificationStrategy>>>,
    /// In-app feed.
    notifications: NotificationService,
    /// Email channel.
    email: EmailGateway,
    /// Front-end base URL for deep links.
    base_url: String,
    /// Recipients handled concurrently per dispatch.
    concurrency: usize,
}

impl NotificationRouter {
    /// Creates a new router with the default strategy table.
    pub fn new(
        notifications: NotificationService,
        email: EmailGateway,
        notifications_config: &NotificationsConfig,
        dispatch_config: &DispatchConfig,
    ) -> Self {
        Self {
            strategies: Arc::new(default_strategies()),
            notifications,
            email,
            base_url: notifications_config.frontend_base_url.clone(),
            concurrency: dispatch_config.concurrency.max(1),
        }
    }

    /// Replace the strategy table.
    pub fn with_strategies(mut self, strategies: Vec<Arc<dyn NotificationStrategy>>) -> Self {
        self.strategies = Arc::new(strategies);
        self
    }

    /// The strategy that will handle a tag.
    ///
    /// Known scenarios use the first supporting strategy. Legacy notices,
    /// unknown names and known scenarios without a strategy fall back to a
    /// generic notice.
    pub fn resolve(&self, tag: &ScenarioTag) -> Arc<dyn NotificationStrategy> {
        match tag {
            ScenarioTag::Known(scenario) => {
                match self.strategies.iter().find(|s| s.supports(*scenario)) {
                    Some(strategy) => Arc::clone(strategy),
                    None => {
                        warn!(scenario = %scenario, "No strategy registered for scenario");
                        Arc::new(FallbackStrategy::new(LegacyNotice::StatusUpdate))
                    }
                }
            }
            ScenarioTag::Legacy(notice) => Arc::new(FallbackStrategy::new(*notice)),
            ScenarioTag::Unknown(raw) => {
                warn!(scenario = %raw, "Unknown notification scenario");
                Arc::new(FallbackStrategy::new(LegacyNotice::StatusUpdate))
            }
        }
    }

    /// Deliver a request to all of its recipients.
    pub async fn dispatch(&self, request: &DispatchRequest) -> DispatchReport {
        let strategy = self.resolve(&request.scenario);

        debug!(
            appointment_id = %request.appointment.id,
            strategy = strategy.name(),
            recipients = request.recipients.len(),
            "Dispatching notification"
        );

        // Boxed up front so the fan-out stays `Send` inside spawned tasks.
        let deliveries: Vec<BoxFuture<'_, RecipientOutcome>> = request
            .recipients
            .iter()
            .map(|recipient| self.deliver(strategy.as_ref(), request, recipient).boxed())
            .collect();
        let outcomes: Vec<RecipientOutcome> = stream::iter(deliveries)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let report = outcomes
            .into_iter()
            .fold(DispatchReport::default(), |mut report, outcome| {
                report.record(outcome);
                report
            });

        info!(
            appointment_id = %request.appointment.id,
            strategy = strategy.name(),
            recipients = report.recipients,
            in_app_failed = report.in_app_failed,
            emails_sent = report.emails_sent,
            emails_failed = report.emails_failed,
            "Notification dispatch complete"
        );
        report
    }

    /// Compose and deliver for one recipient.
    async fn deliver(
        &self,
        strategy: &dyn NotificationStrategy,
        request: &DispatchRequest,
        recipient: &User,
    ) -> RecipientOutcome {
        let ctx = RecipientContext::new(request, recipient, &self.base_url);
        let content = strategy.compose(&ctx);

        let stored = match self
            .notifications
            .upsert_for_appointment(
                recipient.id,
                request.appointment.id,
                &content.title,
                &content.message,
                &content.action_url,
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    recipient_id = %recipient.id,
                    appointment_id = %request.appointment.id,
                    strategy = strategy.name(),
                    error = %e,
                    "In-app notification failed"
                );
                false
            }
        };

        let email = match content.email {
            Some(email) => Some(self.email.send(&ctx, email).await),
            None => None,
        };

        RecipientOutcome { stored, email }
    }
}
