//! Notification domain entities.

pub mod actor;
pub mod kind;
pub mod model;
pub mod scenario;

pub use actor::NotificationActor;
pub use kind::NotificationType;
pub use model::{Notification, NotificationDraft, RELATED_APPOINTMENT};
pub use scenario::{LegacyNotice, NotificationScenario, ScenarioTag};
