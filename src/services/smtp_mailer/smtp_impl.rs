use async_trait::async_trait;
use lettre::{
    message::{MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::{sync::Arc, time::Duration};

use crate::config::RelayCredentials;
use crate::services::notification::ComposedNotification;
use crate::services::smtp_mailer::Mailer;

use super::MailError;

/// Sends notifications through the relay over implicit TLS.
///
/// The transport is built without connection pooling, so each delivery
/// opens its own session and closes it before returning, on success or error.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(relay: &RelayCredentials, timeout: Duration) -> Result<Self, MailError> {
        Ok(Self {
            transport: Arc::new(build_transport(relay, timeout)?),
            timeout,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, notification: &ComposedNotification) -> Result<(), MailError> {
        let message = build_message(notification)?;

        match tokio::time::timeout(self.timeout, self.transport.send(message)).await {
            Ok(result) => result.map(|_| ()).map_err(MailError::from),
            Err(_) => Err(MailError::Timeout(self.timeout)),
        }
    }
}

fn build_transport(
    relay: &RelayCredentials,
    timeout: Duration,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let tls = TlsParameters::new(relay.host.clone())?;
    let creds = Credentials::new(relay.username.clone(), relay.app_password.clone());

    Ok(AsyncSmtpTransport::<Tokio1Executor>::relay(&relay.host)?
        .port(relay.port)
        .tls(Tls::Wrapper(tls))
        .credentials(creds)
        .timeout(Some(timeout))
        .build())
}

fn build_message(notification: &ComposedNotification) -> Result<Message, MailError> {
    let body = MultiPart::alternative().singlepart(SinglePart::html(notification.html_body.clone()));

    Ok(Message::builder()
        .from(notification.sender.clone())
        .to(notification.recipient.clone())
        .subject(notification.subject.clone())
        .multipart(body)?)
}
