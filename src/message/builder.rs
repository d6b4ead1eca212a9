//! The webhook message: field configuration, validation and delivery.

use http::header::{CONTENT_TYPE, HeaderValue};

use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient};

use super::error::{Error, MessageError, UsageError};
use super::fields::{Fields, FieldsMut, REQUIRED_FIELDS, field};

/// A message to be posted to an incoming webhook.
///
/// Built from a configuration callback that fills in the fields through a
/// [`FieldsMut`] handle. The `url` and `text` fields are required; every
/// other field is forwarded as-is in the JSON body.
///
/// # Type Parameters
///
/// - `H`: The HTTP client used by [`Message::send`] (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use teams_webhook::message::Message;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let message = Message::new(|fields| {
///     fields
///         .set("url", "https://example.webhook.office.com/webhookb2/abc")
///         .set("title", "Deploy")
///         .set("text", "Release 1.2.0 is live");
/// })?;
///
/// let response = message.send().await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Message<H = ReqwestClient> {
    fields: Fields,
    client: H,
}

impl Message<ReqwestClient> {
    /// Creates a message sent through a default [`ReqwestClient`].
    ///
    /// The default client does not verify TLS certificates; use
    /// [`Message::with_client`] with a client built from
    /// [`TransportOptions`](crate::webhook::TransportOptions) to change that.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidMessage`] if the callback leaves a
    /// required field blank.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized (see [`ReqwestClient::new`]).
    pub fn new<F>(configure: F) -> Result<Self, MessageError>
    where
        F: FnOnce(&mut FieldsMut<'_>),
    {
        Self::with_client(ReqwestClient::new(), configure)
    }

    /// Like [`Message::new`], for callers whose callback is optional.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::MissingConfiguration`] if `configure` is `None`,
    /// or [`MessageError::InvalidMessage`] if validation fails.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized (see [`ReqwestClient::new`]).
    pub fn try_new<F>(configure: Option<F>) -> Result<Self, Error>
    where
        F: FnOnce(&mut FieldsMut<'_>),
    {
        let configure = configure.ok_or(UsageError::MissingConfiguration)?;
        Ok(Self::new(configure)?)
    }
}

impl<H> Message<H> {
    /// Creates a message sent through the given HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidMessage`] if the callback leaves a
    /// required field blank.
    pub fn with_client<F>(client: H, configure: F) -> Result<Self, MessageError>
    where
        F: FnOnce(&mut FieldsMut<'_>),
    {
        let mut fields = Fields::new();
        configure(&mut FieldsMut::new(&mut fields));

        let message = Self { fields, client };
        message.validate()?;
        Ok(message)
    }

    /// Like [`Message::with_client`], for callers whose callback is optional.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::MissingConfiguration`] if `configure` is `None`,
    /// or [`MessageError::InvalidMessage`] if validation fails.
    pub fn try_with_client<F>(client: H, configure: Option<F>) -> Result<Self, Error>
    where
        F: FnOnce(&mut FieldsMut<'_>),
    {
        let configure = configure.ok_or(UsageError::MissingConfiguration)?;
        Ok(Self::with_client(client, configure)?)
    }

    /// Returns the message fields.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a handle for editing individual fields.
    ///
    /// Changes are validated again on the next [`Message::send`].
    pub const fn fields_mut(&mut self) -> FieldsMut<'_> {
        FieldsMut::new(&mut self.fields)
    }

    /// Rejects wholesale replacement of the field accumulator.
    ///
    /// The accumulator belongs to the message for its whole lifetime and
    /// `fields` is discarded; edit individual fields through
    /// [`Message::fields_mut`] instead.
    ///
    /// # Errors
    ///
    /// Always returns [`UsageError::FieldsReplaced`].
    #[allow(clippy::unused_self, clippy::needless_pass_by_value)]
    pub fn replace_fields(
        &mut self,
        fields: Vec<(String, Option<String>)>,
    ) -> Result<(), UsageError> {
        tracing::debug!(
            discarded = fields.len(),
            "Rejected wholesale replacement of message fields"
        );
        Err(UsageError::FieldsReplaced)
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Checks that every required field is present, non-null and non-empty.
    ///
    /// Fields are checked in the order `url`, `text`; the first blank one
    /// is reported.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidMessage`] naming the blank field.
    pub fn validate(&self) -> Result<(), MessageError> {
        match REQUIRED_FIELDS
            .into_iter()
            .find(|name| self.fields.is_blank(name))
        {
            Some(name) => Err(MessageError::invalid(name)),
            None => Ok(()),
        }
    }

    /// Builds the POST request for the current fields.
    fn build_request(&self) -> Result<HttpRequest, MessageError> {
        let raw_url = self
            .fields
            .get(field::URL)
            .ok_or_else(|| MessageError::invalid(field::URL))?;
        let url = url::Url::parse(raw_url)
            .map_err(|e| MessageError::transport(HttpError::InvalidUrl(e.to_string())))?;

        let body = self.fields.to_json().to_string().into_bytes();

        Ok(HttpRequest::post(url)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(body))
    }
}

impl<H: HttpClient> Message<H> {
    /// Posts the message to its `url` once.
    ///
    /// Validation runs first, so fields blanked after construction are
    /// caught before any request is made. Any 2xx or 3xx answer counts as
    /// delivered; redirects are not followed.
    ///
    /// # Errors
    ///
    /// - [`MessageError::InvalidMessage`] if a required field is blank
    /// - [`MessageError::FailedRequest`] if the webhook answered with any
    ///   other status, or no complete answer was received
    pub async fn send(&self) -> Result<HttpResponse, MessageError> {
        self.validate()?;
        let request = self.build_request()?;

        tracing::debug!(
            host = request.url.host_str().unwrap_or_default(),
            fields = self.fields.len(),
            "Posting message to webhook"
        );

        let response = self.client.request(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Webhook request failed");
            MessageError::transport(e)
        })?;

        if !response.is_delivered() {
            tracing::warn!(status = %response.status, "Webhook rejected message");
            return Err(MessageError::rejected(response.status));
        }

        tracing::debug!(status = %response.status, "Webhook accepted message");
        Ok(response)
    }
}
