//! # oshapp-entity
//!
//! Domain entity models for the OSH appointment platform. Every struct in
//! this crate is either a stored record (appointment, user, employee,
//! notification) or a domain value object (status, type, role, scenario).
//! All entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod appointment;
pub mod notification;
pub mod user;
