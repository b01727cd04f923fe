use crate::services::notification::ComposedNotification;
use crate::services::smtp_mailer::{MailError, Mailer};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock mailer that records delivered notifications for testing purposes.
#[derive(Debug, Default)]
pub struct MockMailer {
    pub delivered: Mutex<Vec<ComposedNotification>>,
    pub attempts: Mutex<usize>,
    pub fail_send: bool,
}

impl MockMailer {
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }

    pub fn delivered(&self) -> Vec<ComposedNotification> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn deliver(&self, notification: &ComposedNotification) -> Result<(), MailError> {
        *self.attempts.lock().unwrap() += 1;

        if self.fail_send {
            return Err(MailError::Transport(
                "permanent error (535): 5.7.8 Username and Password not accepted".into(),
            ));
        }

        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
