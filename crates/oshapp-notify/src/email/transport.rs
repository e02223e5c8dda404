//! Email transport trait.

use async_trait::async_trait;

use oshapp_core::result::AppResult;

use super::message::EmailMessage;

/// Something that can deliver an email.
#[async_trait]
pub trait EmailTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Transport name for logs.
    fn name(&self) -> &'static str;

    /// Deliver one message.
    async fn send(&self, message: EmailMessage) -> AppResult<()>;
}
