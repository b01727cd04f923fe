use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::Error as SmtpError;

use crate::services::notification::ComposedNotification;

/// Delivery failures. The text is a server-side diagnostic and must not be
/// returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("relay transport error: {0}")]
    Transport(String),
    #[error("relay did not complete delivery within {0:?}")]
    Timeout(Duration),
}

impl From<SmtpError> for MailError {
    fn from(err: SmtpError) -> Self {
        MailError::Transport(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Makes exactly one delivery attempt for `notification`.
    async fn deliver(&self, notification: &ComposedNotification) -> Result<(), MailError>;
}

#[cfg(test)]
mod mock_mailer;
mod smtp_impl;

#[cfg(test)]
pub use mock_mailer::MockMailer;
pub use smtp_impl::SmtpMailer;
