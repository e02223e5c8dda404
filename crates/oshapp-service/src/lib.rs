//! # oshapp-service
//!
//! Business logic for the OSH appointment platform. The appointment
//! service drives the workflow state machine, commits each transition and
//! hands a [`DispatchRequest`] to whichever [`DispatchSink`] it was built
//! with. Notification content is produced downstream by `oshapp-notify`.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod appointment;
pub mod context;
pub mod notification;
pub mod policy;

pub use appointment::{
    AppointmentService, AppointmentView, DispatchRequest, DispatchSink, Transition,
};
pub use context::RequestContext;
pub use notification::{Audience, NotificationService, RecipientResolver};
pub use policy::{Viewer, VisibilityPolicy};
