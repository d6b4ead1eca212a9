//! Tests for the run module.

use std::io;
use std::sync::{Arc, Mutex};

use teams_webhook::webhook::{HttpRequest, HttpResponse};

use super::*;

/// Mock client answering with a fixed status and recording bodies.
struct MockClient {
    status: http::StatusCode,
    bodies: Mutex<Vec<Vec<u8>>>,
}

impl MockClient {
    fn new(status: u16) -> Self {
        Self {
            status: http::StatusCode::from_u16(status).unwrap(),
            bodies: Mutex::new(Vec::new()),
        }
    }
}

impl HttpClient for &MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.bodies
            .lock()
            .unwrap()
            .push(req.body.unwrap_or_default());
        Ok(HttpResponse::new(self.status, http::HeaderMap::new(), vec![]))
    }
}

fn fields(entries: &[(&str, Option<&str>)]) -> Vec<FieldEntry> {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.map(str::to_string)))
        .collect()
}

fn valid_fields() -> Vec<FieldEntry> {
    fields(&[
        ("url", Some("https://example.com/hook")),
        ("text", Some("hi")),
        ("summary", None),
    ])
}

fn sending() -> RuntimeOptions {
    RuntimeOptions {
        dry_run: false,
        certificate_verification: CertificateVerification::Disabled,
    }
}

fn dry_run() -> RuntimeOptions {
    RuntimeOptions {
        dry_run: true,
        ..sending()
    }
}

/// In-memory log sink shared with a test subscriber.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `deliver` with a thread-local subscriber and returns what it logged.
async fn logs_of_deliver(client: &MockClient, options: RuntimeOptions) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    deliver(client, valid_fields(), options).await.unwrap();
    buf.contents()
}

mod run_error {
    use super::*;

    #[test]
    fn client_error_displays_source() {
        let error = RunError::Client(HttpError::Timeout);

        assert_eq!(
            error.to_string(),
            "Failed to create HTTP client: Request timed out"
        );
    }

    #[test]
    fn message_error_is_transparent() {
        let error = RunError::from(MessageError::invalid("text"));

        assert_eq!(error.to_string(), "'text' must be defined in Message");
    }
}

mod deliver {
    use super::*;

    #[tokio::test]
    async fn sends_fields_in_order() {
        let client = MockClient::new(200);

        let status = deliver(&client, valid_fields(), sending()).await.unwrap();

        assert_eq!(status, Some(http::StatusCode::OK));
        let bodies = client.bodies.lock().unwrap();
        assert_eq!(
            String::from_utf8(bodies[0].clone()).unwrap(),
            r#"{"url":"https://example.com/hook","text":"hi","summary":null}"#
        );
    }

    #[tokio::test]
    async fn dry_run_does_not_send() {
        let client = MockClient::new(200);

        let status = deliver(&client, valid_fields(), dry_run()).await.unwrap();

        assert_eq!(status, None);
        assert!(client.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dry_run_does_not_warn_about_verification() {
        let client = MockClient::new(200);

        let logs = logs_of_deliver(&client, dry_run()).await;

        assert!(logs.contains("Dry-run mode enabled"));
        assert!(!logs.contains("verification is disabled"));
    }

    #[tokio::test]
    async fn unverified_send_warns_about_verification() {
        let client = MockClient::new(200);

        let logs = logs_of_deliver(&client, sending()).await;

        assert!(logs.contains("TLS certificate verification is disabled"));
        assert!(logs.contains("Message delivered"));
    }

    #[tokio::test]
    async fn verified_send_does_not_warn() {
        let client = MockClient::new(200);
        let options = RuntimeOptions {
            certificate_verification: CertificateVerification::Enabled,
            ..sending()
        };

        let logs = logs_of_deliver(&client, options).await;

        assert!(!logs.contains("verification is disabled"));
        assert!(logs.contains("Message delivered"));
    }

    #[tokio::test]
    async fn missing_text_is_message_error() {
        let client = MockClient::new(200);
        let entries = fields(&[("url", Some("https://example.com/hook"))]);

        let result = deliver(&client, entries, sending()).await;

        assert!(matches!(
            result,
            Err(RunError::Message(MessageError::InvalidMessage { field: "text" }))
        ));
    }

    #[tokio::test]
    async fn rejected_status_is_message_error() {
        let client = MockClient::new(400);

        let result = deliver(&client, valid_fields(), sending()).await;

        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The message failed to be sent (HTTP Code 400)"
        );
    }
}
