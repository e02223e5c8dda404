//! In-memory transport that records every message.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use oshapp_core::error::AppError;
use oshapp_core::result::AppResult;

use super::message::EmailMessage;
use super::transport::EmailTransport;

/// Records sent messages; can be made slow or failing.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    delay: Option<Duration>,
    fail: bool,
}

impl MemoryTransport {
    /// Creates a new recording transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before each send.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reject every send.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Every message accepted so far.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Messages addressed to the given email.
    pub async fn sent_to(&self, address: &str) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| m.to.iter().any(|to| to == address))
            .cloned()
            .collect()
    }

    /// Forget recorded messages.
    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl EmailTransport for MemoryTransport {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(AppError::external(format!(
                "Mail relay rejected message to {:?}",
                message.to
            )));
        }
        self.sent.lock().await.push(message);
        Ok(())
    }
}
