//! Notification dispatch worker configuration.

use serde::{Deserialize, Serialize};

/// How dispatch requests are executed after a transition commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Run the router on the caller's task before returning.
    Inline,
    /// Hand the request to a background worker over a channel.
    Background,
}

/// Dispatch worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Execution mode.
    #[serde(default = "default_mode")]
    pub mode: DispatchMode,
    /// Number of recipients processed concurrently per dispatch.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Capacity of the background request queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Seconds to wait for in-flight dispatches on shutdown.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            concurrency: default_concurrency(),
            queue_capacity: default_queue_capacity(),
            shutdown_grace_seconds: default_shutdown_grace(),
        }
    }
}

fn default_mode() -> DispatchMode {
    DispatchMode::Background
}

fn default_concurrency() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_shutdown_grace() -> u64 {
    10
}
