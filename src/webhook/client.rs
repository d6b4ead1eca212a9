//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Whether the server certificate is checked on TLS connections.
///
/// Defaults to [`CertificateVerification::Disabled`] to match the historical
/// behavior of incoming webhook senders. With verification disabled any
/// party able to intercept the connection can read or alter the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CertificateVerification {
    /// Accept any certificate presented by the server.
    #[default]
    Disabled,
    /// Verify the certificate chain and host name.
    Enabled,
}

impl CertificateVerification {
    /// Returns true if certificates are verified.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Transport settings for [`ReqwestClient`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// TLS certificate verification mode
    pub certificate_verification: CertificateVerification,
    /// Whole-request timeout; `None` keeps the client defaults
    pub timeout: Option<Duration>,
}

impl TransportOptions {
    /// Creates options with verification disabled and no timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            certificate_verification: CertificateVerification::Disabled,
            timeout: None,
        }
    }

    /// Sets the certificate verification mode.
    #[must_use]
    pub const fn with_certificate_verification(mut self, mode: CertificateVerification) -> Self {
        self.certificate_verification = mode;
        self
    }

    /// Sets a whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements [`HttpClient`].
/// Redirects are never followed: a 3xx answer is handed back to the caller
/// as-is.
///
/// # Example
///
/// ```no_run
/// use teams_webhook::webhook::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://example.webhook.office.com/webhookb2/abc")?;
/// let request = HttpRequest::post(url).with_body(br#"{"text":"hi"}"#.to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with default [`TransportOptions`].
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, the same condition
    /// under which `reqwest::Client::new` panics. Use
    /// [`ReqwestClient::with_options`] to handle it as an error.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&TransportOptions::default())
            .expect("TLS backend failed to initialize")
    }

    /// Creates a client configured from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the underlying client cannot be built.
    pub fn with_options(options: &TransportOptions) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(!options.certificate_verification.is_enabled());

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder.build().map_err(|e| HttpError::Build(Box::new(e)))?;
        Ok(Self { inner })
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// The caller's redirect and TLS settings are used unchanged.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Body {
                status,
                source: Box::new(e),
            })?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
