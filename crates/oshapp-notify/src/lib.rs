//! Notification dispatch for the OSH appointment platform.
//!
//! This crate provides:
//! - One strategy per workflow scenario, composing per-recipient content
//! - A router that fans a dispatch request out to every recipient
//! - An email gateway with recipient rules, privacy filtering and timeouts
//! - Inline and background dispatch sinks for the appointment service

pub mod content;
pub mod email;
pub mod format;
pub mod queue;
pub mod router;
pub mod strategy;

pub use content::{Cta, EmailContent, NotificationContent};
pub use email::{EmailGateway, EmailTransport, LogTransport, MemoryTransport, SendOutcome};
pub use queue::{DispatchQueue, DispatchWorker, InlineDispatch, sink_for};
pub use router::{DispatchReport, NotificationRouter};
pub use strategy::{NotificationStrategy, RecipientContext, default_strategies};
