//! Notification feed service and recipient resolution rules.

pub mod rules;
pub mod service;

pub use rules::{Audience, RecipientResolver};
pub use service::NotificationService;
