//! Transport that only logs what it would send.

use async_trait::async_trait;
use tracing::info;

use oshapp_core::result::AppResult;

use super::message::EmailMessage;
use super::transport::EmailTransport;

/// Logs each message at INFO instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl EmailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        info!(
            to = ?message.to,
            subject = %message.subject,
            template = %message.template,
            appointment_id = %message.appointment_id,
            "Email sent"
        );
        Ok(())
    }
}
