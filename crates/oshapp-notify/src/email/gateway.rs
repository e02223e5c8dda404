//! Email gateway: recipient rules, privacy filtering and bounded sends.
//!
//! The gateway decides whether a composed email goes out at all, fills in
//! the appointment variables every template receives, removes restricted
//! variables and buttons for RH and managers, and bounds the transport
//! call with a timeout. It never returns an error: every failure is logged
//! and reported as a [`SendOutcome`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use oshapp_core::config::EmailConfig;
use oshapp_service::VisibilityPolicy;

use crate::content::{Cta, EmailContent};
use crate::format;
use crate::strategy::RecipientContext;

use super::message::{EmailMessage, ResolvedCta};
use super::transport::EmailTransport;

/// Label used when a primary button has none.
pub const DEFAULT_PRIMARY_LABEL: &str = "Ouvrir l'application";

/// Label used when a secondary button has none.
pub const DEFAULT_SECONDARY_LABEL: &str = "Annuler";

/// What happened to one email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the transport successfully.
    Sent,
    /// The email channel is switched off.
    Disabled,
    /// The recipient has no usable address.
    NoMailbox,
    /// The recipient performed the action and holds no privileged role.
    SelfAction,
    /// The transport returned an error.
    Failed,
    /// The transport did not answer in time.
    TimedOut,
}

impl SendOutcome {
    /// Whether the email went out.
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Whether the email was deliberately not sent.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Disabled | Self::NoMailbox | Self::SelfAction)
    }
}

/// Applies recipient rules and sends through a transport.
#[derive(Debug, Clone)]
pub struct EmailGateway {
    /// Underlying transport.
    transport: Arc<dyn EmailTransport>,
    /// Email settings.
    config: EmailConfig,
}

impl EmailGateway {
    /// Creates a new email gateway.
    pub fn new(transport: Arc<dyn EmailTransport>, config: EmailConfig) -> Self {
        Self { transport, config }
    }

    /// Send a composed email to the context's recipient.
    pub async fn send(&self, ctx: &RecipientContext<'_>, content: EmailContent) -> SendOutcome {
        let recipient = ctx.recipient();
        let appointment_id = ctx.appointment().id;

        if !self.config.enabled {
            return SendOutcome::Disabled;
        }
        if !recipient.has_mailbox() {
            debug!(
                recipient_id = %recipient.id,
                appointment_id = %appointment_id,
                "Recipient has no email address, skipping email"
            );
            return SendOutcome::NoMailbox;
        }
        if ctx.is_actor() && !recipient.is_privileged() {
            debug!(
                recipient_id = %recipient.id,
                appointment_id = %appointment_id,
                "Recipient performed the action, skipping email"
            );
            return SendOutcome::SelfAction;
        }

        let message = self.build(ctx, content);
        let timeout = Duration::from_millis(self.config.send_timeout_ms);

        match tokio::time::timeout(timeout, self.transport.send(message)).await {
            Ok(Ok(())) => {
                debug!(
                    recipient_id = %recipient.id,
                    appointment_id = %appointment_id,
                    transport = self.transport.name(),
                    "Email handed to transport"
                );
                SendOutcome::Sent
            }
            Ok(Err(e)) => {
                warn!(
                    recipient_id = %recipient.id,
                    appointment_id = %appointment_id,
                    transport = self.transport.name(),
                    error = %e,
                    "Email send failed"
                );
                SendOutcome::Failed
            }
            Err(_) => {
                warn!(
                    recipient_id = %recipient.id,
                    appointment_id = %appointment_id,
                    transport = self.transport.name(),
                    timeout_ms = self.config.send_timeout_ms,
                    "Email send timed out"
                );
                SendOutcome::TimedOut
            }
        }
    }

    /// Assemble the final message for the recipient.
    fn build(&self, ctx: &RecipientContext<'_>, content: EmailContent) -> EmailMessage {
        let restricted = VisibilityPolicy::should_hide_email_cta(ctx.recipient(), ctx.employee());

        let mut vars = appointment_vars(ctx);
        vars.extend(content.vars);
        if restricted || ctx.is_restricted() {
            VisibilityPolicy::strip_restricted(&mut vars);
        }

        let (primary_cta, secondary_cta) = if restricted {
            (None, None)
        } else {
            (
                content.primary.map(|c| resolve(c, DEFAULT_PRIMARY_LABEL)),
                content.secondary.map(|c| resolve(c, DEFAULT_SECONDARY_LABEL)),
            )
        };

        EmailMessage {
            from: self.config.from_address.clone(),
            to: vec![ctx.recipient().email.trim().to_string()],
            subject: content.subject,
            template: content.template,
            appointment_id: ctx.appointment().id,
            primary_cta,
            secondary_cta,
            vars,
        }
    }
}

fn resolve(cta: Cta, default_label: &str) -> ResolvedCta {
    let label = cta
        .label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| default_label.to_string());
    ResolvedCta { url: cta.url, label }
}

/// Variables every appointment template receives. Private fields come
/// through the recipient's visibility, never straight from the appointment.
fn appointment_vars(ctx: &RecipientContext<'_>) -> Map<String, Value> {
    let appt = ctx.appointment();
    let mut vars = Map::new();
    vars.insert("appointmentId".into(), appt.id.to_string().into());
    vars.insert("appointmentType".into(), appt.kind.label().into());
    vars.insert("status".into(), appt.status.label().into());
    vars.insert("date".into(), format::date_time(appt.effective_date()).into());
    vars.insert("recipientName".into(), ctx.recipient().name().into());
    vars.insert("employeeName".into(), ctx.employee_name().into());
    vars.insert("employeeEmail".into(), ctx.employee_email().into());
    vars.insert("obligatory".into(), appt.is_obligatory.into());

    let optional = [
        ("motif", ctx.motif()),
        ("notes", ctx.notes()),
        ("medicalInstructions", ctx.instructions()),
        ("medicalServicePhone", ctx.service_phone()),
    ];
    for (key, value) in optional {
        if let Some(text) = value.filter(|t| !t.trim().is_empty()) {
            vars.insert(key.into(), text.into());
        }
    }
    vars
}
