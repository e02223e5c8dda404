//! Hand-off point between committed transitions and notification delivery.

use async_trait::async_trait;

use oshapp_core::result::AppResult;
use oshapp_core::types::id::UserId;
use oshapp_entity::appointment::Appointment;
use oshapp_entity::notification::{NotificationActor, ScenarioTag};
use oshapp_entity::user::{Employee, User};

/// Everything a router needs to notify one audience about one event.
///
/// The appointment and directory data are snapshots taken right after the
/// transition committed.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Event kind.
    pub scenario: ScenarioTag,
    /// The committed appointment.
    pub appointment: Appointment,
    /// The employee the appointment is for.
    pub employee: Employee,
    /// The employee's user account, for name and email.
    pub employee_user: Option<User>,
    /// Resolved recipients, deduplicated.
    pub recipients: Vec<User>,
    /// The user who performed the transition.
    pub actor_id: Option<UserId>,
    /// Overrides the actor implied by the scenario name.
    pub actor_override: Option<NotificationActor>,
    /// Optional text appended to or replacing the canned message.
    pub extra_message: Option<String>,
}

impl DispatchRequest {
    /// Create a request with no actor information.
    pub fn new(
        scenario: impl Into<ScenarioTag>,
        appointment: Appointment,
        employee: Employee,
        recipients: Vec<User>,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            appointment,
            employee,
            employee_user: None,
            recipients,
            actor_id: None,
            actor_override: None,
            extra_message: None,
        }
    }

    /// Attach the employee's user account.
    pub fn with_employee_user(mut self, user: Option<User>) -> Self {
        self.employee_user = user;
        self
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, actor_id: UserId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Force the actor classification.
    pub fn with_actor_override(mut self, actor: Option<NotificationActor>) -> Self {
        self.actor_override = actor;
        self
    }

    /// Attach an extra message.
    pub fn with_extra_message(mut self, message: Option<String>) -> Self {
        self.extra_message = message.filter(|m| !m.trim().is_empty());
        self
    }

    /// The effective actor: the override, else the one implied by the scenario.
    pub fn actor(&self) -> Option<NotificationActor> {
        self.actor_override.or(match &self.scenario {
            ScenarioTag::Known(scenario) => scenario.implied_actor(),
            _ => None,
        })
    }

    /// Whether the given user performed the transition.
    pub fn is_actor(&self, user_id: UserId) -> bool {
        self.actor_id == Some(user_id)
    }
}

/// Destination for dispatch requests.
///
/// Implementations either deliver inline or enqueue for a background
/// worker. Delivery failures are never reported back through this trait;
/// an error only means the request could not be accepted.
#[async_trait]
pub trait DispatchSink: Send + Sync + std::fmt::Debug + 'static {
    /// Accept a request for delivery.
    async fn submit(&self, request: DispatchRequest) -> AppResult<()>;
}
