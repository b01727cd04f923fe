use serde_json::Value;
use tracing::{error, info};

use crate::config::RelayCredentials;
use crate::models::contact::{validate, ValidationFailure};
use crate::services::notification::compose;
use crate::services::smtp_mailer::{MailError, Mailer};

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("submission rejected: {0}")]
    Rejected(ValidationFailure),
    #[error("delivery failed: {0}")]
    Failed(MailError),
}

/// Validates a submission, renders the thank-you email and makes one
/// delivery attempt. Identical submissions are not deduplicated.
pub async fn process_submission(
    raw: &Value,
    relay: &RelayCredentials,
    mailer: &dyn Mailer,
) -> Result<(), ContactError> {
    let submission = validate(raw).map_err(|failure| {
        info!(fields = ?failure.fields(), "contact submission rejected");
        ContactError::Rejected(failure)
    })?;

    let notification = compose(&submission, relay);

    mailer.deliver(&notification).await.map_err(|err| {
        error!(error = %err, "failed to deliver contact notification");
        ContactError::Failed(err)
    })?;

    info!(service = %submission.service, "contact notification delivered");
    Ok(())
}
