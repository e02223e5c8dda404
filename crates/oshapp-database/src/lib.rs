//! # oshapp-database
//!
//! Persistence contracts for appointments, the user/employee directory,
//! and the in-app notification store, plus concurrent in-memory
//! implementations backed by `dashmap`.
//!
//! Services depend on the traits in [`repositories`]; a relational backend
//! plugs in by implementing the same traits.

pub mod memory;
pub mod repositories;

pub use memory::{MemoryAppointmentRepository, MemoryDirectory, MemoryNotificationRepository};
pub use repositories::{AppointmentRepository, DirectoryRepository, NotificationRepository};
