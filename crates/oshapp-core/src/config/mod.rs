//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files layered with `OSHAPP__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod dispatch;
pub mod email;
pub mod logging;
pub mod notification;
pub mod workflow;

use serde::{Deserialize, Serialize};

pub use self::dispatch::{DispatchConfig, DispatchMode};
pub use self::email::EmailConfig;
pub use self::logging::LoggingConfig;
pub use self::notification::NotificationsConfig;
pub use self::workflow::WorkflowConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// In-app notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Email delivery settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Dispatch worker settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Appointment workflow settings.
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables prefixed with `OSHAPP__` (e.g. `OSHAPP__EMAIL__ENABLED`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("OSHAPP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to parse config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.notifications.frontend_base_url.trim().is_empty() {
            return Err(AppError::configuration(
                "notifications.frontend_base_url must not be empty",
            ));
        }
        if self.notifications.max_field_length < 4 {
            return Err(AppError::configuration(
                "notifications.max_field_length must be at least 4",
            ));
        }
        if self.dispatch.concurrency == 0 {
            return Err(AppError::configuration(
                "dispatch.concurrency must be at least 1",
            ));
        }
        if self.email.send_timeout_ms == 0 {
            return Err(AppError::configuration(
                "email.send_timeout_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}
