//! Unified application error types.
//!
//! Workflow failures (`Unauthorized`, `InvalidStateTransition`,
//! `Validation`, `NotFound`) are surfaced to callers. Failures raised while
//! delivering notifications carry [`ErrorKind::NotificationDelivery`] and are
//! only ever logged by the dispatcher.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Wrong actor role or ownership for the requested operation.
    Unauthorized,
    /// Required input was missing or malformed.
    Validation,
    /// The current workflow status does not permit the transition.
    InvalidStateTransition,
    /// A concurrent modification won the race.
    Conflict,
    /// In-app or email delivery failed during dispatch.
    NotificationDelivery,
    /// An internal error occurred.
    Internal,
    /// The backing store failed.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An external collaborator (email transport, directory) failed.
    ExternalService,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::InvalidStateTransition => write!(f, "INVALID_STATE_TRANSITION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::NotificationDelivery => write!(f, "NOTIFICATION_DELIVERY"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

/// The unified application error.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an invalid-transition error naming both states.
    pub fn invalid_transition(current: impl fmt::Display, target: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::InvalidStateTransition,
            format!("Cannot move appointment from {current} to {target}"),
        )
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a notification delivery error.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotificationDelivery, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Whether this error must be reported back to the caller of a transition.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Unauthorized
                | ErrorKind::InvalidStateTransition
                | ErrorKind::Validation
                | ErrorKind::NotFound
                | ErrorKind::Conflict
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(ErrorKind::Validation, format!("Invalid input: {err}"), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_names_both_states() {
        let err = AppError::invalid_transition("CANCELLED", "CONFIRMED");
        assert_eq!(err.kind, ErrorKind::InvalidStateTransition);
        assert!(err.message.contains("CANCELLED"));
        assert!(err.message.contains("CONFIRMED"));
        assert_eq!(
            err.to_string(),
            "INVALID_STATE_TRANSITION: Cannot move appointment from CANCELLED to CONFIRMED"
        );
    }

    #[test]
    fn test_rejection_kinds() {
        assert!(AppError::unauthorized("x").is_rejection());
        assert!(AppError::validation("x").is_rejection());
        assert!(!AppError::delivery("x").is_rejection());
        assert!(!AppError::internal("x").is_rejection());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Storage, "disk", io);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.kind, ErrorKind::Storage);
    }
}
