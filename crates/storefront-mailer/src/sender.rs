//! The mail sending trait and transport selection.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_core::config::EmailConfig;
use storefront_core::AppResult;

use crate::memory::MemoryMailer;
use crate::smtp::SmtpMailer;

/// Sends a single plain-text message to one recipient.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Builds the configured transport.
///
/// With `email.enabled = false` the in-memory outbox is used, which
/// accepts every message without touching the network. Tests and local
/// development run in this mode.
pub fn build_mailer(config: &EmailConfig) -> AppResult<Arc<dyn MailSender>> {
    if config.enabled {
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        tracing::info!("email delivery disabled, using in-memory outbox");
        Ok(Arc::new(MemoryMailer::new()))
    }
}
