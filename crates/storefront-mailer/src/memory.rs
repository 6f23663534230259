//! In-memory outbox used when delivery is disabled and in tests.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_core::{AppError, AppResult};
use tokio::sync::Mutex;

use crate::sender::MailSender;

/// A message the outbox accepted.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Collects messages instead of delivering them.
///
/// Tests flip [`MemoryMailer::set_failing`] to exercise the paths
/// where the SMTP relay rejects a message.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().await.clone()
    }

    /// Makes every subsequent send fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.lock().await = failing;
    }
}

#[async_trait]
impl MailSender for MemoryMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        if *self.failing.lock().await {
            return Err(AppError::email_delivery("Mail delivery failed"));
        }

        tracing::debug!(to = %to, subject = %subject, "outbox accepted email");
        self.sent.lock().await.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
