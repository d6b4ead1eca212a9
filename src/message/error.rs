//! Error types for building and sending messages.

use thiserror::Error;

use crate::webhook::HttpError;

/// Errors raised while validating or delivering a message.
///
/// Both variants describe a problem with the data or the remote endpoint.
/// Programmer misuse is reported separately through [`UsageError`].
#[derive(Debug, Error)]
pub enum MessageError {
    /// A required field is absent, null or empty.
    #[error("'{field}' must be defined in Message")]
    InvalidMessage {
        /// Name of the offending field
        field: &'static str,
    },

    /// The webhook did not accept the message.
    ///
    /// `status` is `None` when no response was received at all. Any
    /// transport error is available as the error source.
    #[error(
        "The message failed to be sent (HTTP Code {})",
        code_label(.status)
    )]
    FailedRequest {
        /// Status code of the response, if one was received
        status: Option<http::StatusCode>,
        /// Transport failure that prevented a response
        #[source]
        source: Option<HttpError>,
    },
}

impl MessageError {
    /// Creates an `InvalidMessage` error for a field.
    #[must_use]
    pub const fn invalid(field: &'static str) -> Self {
        Self::InvalidMessage { field }
    }

    /// Creates a `FailedRequest` error for a rejected response.
    #[must_use]
    pub const fn rejected(status: http::StatusCode) -> Self {
        Self::FailedRequest {
            status: Some(status),
            source: None,
        }
    }

    /// Creates a `FailedRequest` error for a transport failure.
    ///
    /// Keeps the status when one arrived before the failure.
    #[must_use]
    pub const fn transport(source: HttpError) -> Self {
        Self::FailedRequest {
            status: source.status(),
            source: Some(source),
        }
    }

    /// Returns the HTTP status of a failed request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::FailedRequest { status, .. } => *status,
            Self::InvalidMessage { .. } => None,
        }
    }
}

// Blank when no response was received.
#[allow(clippy::ref_option)]
fn code_label(status: &Option<http::StatusCode>) -> String {
    status.map_or_else(String::new, |s| s.as_u16().to_string())
}

/// Misuse of the [`Message`](super::Message) API.
///
/// Never caused by message content or by the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A message was constructed without a configuration callback.
    #[error("Message requires a configuration block")]
    MissingConfiguration,

    /// An attempt was made to replace the field accumulator wholesale.
    #[error("Message fields cannot be replaced; modify them through fields_mut()")]
    FieldsReplaced,
}

/// Any error from the dynamic [`Message`](super::Message) constructors.
#[derive(Debug, Error)]
pub enum Error {
    /// The API was misused.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Validation or delivery failed.
    #[error(transparent)]
    Message(#[from] MessageError),
}
