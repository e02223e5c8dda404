//! # oshapp-core
//!
//! Core crate for the OSH appointment platform. Contains configuration
//! schemas, typed identifiers, and the unified error system shared by the
//! workflow and notification crates.
//!
//! This crate has **no** internal dependencies on other oshapp crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
