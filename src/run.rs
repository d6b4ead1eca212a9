//! Application execution logic.
//!
//! Builds the message from the validated configuration and sends it once.

use thiserror::Error;

use teams_webhook::config::{FieldEntry, ValidatedConfig};
use teams_webhook::message::{Message, MessageError};
use teams_webhook::webhook::{CertificateVerification, HttpClient, HttpError, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] HttpError),

    /// The message was invalid or was not accepted.
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Runtime options extracted from validated config.
///
/// Holds only what delivery needs, so the config's `fields` can be moved
/// separately.
#[derive(Debug, Clone, Copy)]
struct RuntimeOptions {
    dry_run: bool,
    certificate_verification: CertificateVerification,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            dry_run: config.dry_run,
            certificate_verification: config.transport.certificate_verification,
        }
    }
}

/// Executes a single send.
///
/// # Errors
///
/// Returns [`RunError`] if the client cannot be built, the fields do not
/// form a valid message, or the webhook does not accept it.
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);

    let client = ReqwestClient::with_options(&config.transport).map_err(RunError::Client)?;
    deliver(client, config.fields, options).await?;
    Ok(())
}

/// Builds the message and either prints or sends it.
///
/// Returns the response status, or `None` in dry-run mode.
async fn deliver<H: HttpClient>(
    client: H,
    fields: Vec<FieldEntry>,
    options: RuntimeOptions,
) -> Result<Option<http::StatusCode>, RunError> {
    let message = Message::with_client(client, |f| {
        for (name, value) in fields {
            f.insert(name, value);
        }
    })?;

    if options.dry_run {
        tracing::info!("Dry-run mode enabled - message will be printed but not sent");
        println!("{:#}", message.fields().to_json());
        return Ok(None);
    }

    if !options.certificate_verification.is_enabled() {
        tracing::warn!(
            "TLS certificate verification is disabled; use --verify-certificates to enable it"
        );
    }

    let response = message.send().await?;
    tracing::info!(status = %response.status, "Message delivered");
    Ok(Some(response.status))
}
