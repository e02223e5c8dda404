//! In-app notification configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by the notification store and the strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Base URL of the web front end, used to build action links.
    #[serde(default = "default_frontend_base_url")]
    pub frontend_base_url: String,
    /// Maximum stored length of a notification title or message.
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,
    /// Default page size when listing a user's feed.
    #[serde(default = "default_feed_limit")]
    pub default_feed_limit: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            frontend_base_url: default_frontend_base_url(),
            max_field_length: default_max_field_length(),
            default_feed_limit: default_feed_limit(),
        }
    }
}

fn default_frontend_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_field_length() -> usize {
    255
}

fn default_feed_limit() -> usize {
    50
}
