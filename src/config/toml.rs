//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Message content section
    #[serde(default)]
    pub message: MessageSection,

    /// Transport section
    #[serde(default)]
    pub transport: TransportSection,
}

/// Message content section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSection {
    /// Incoming webhook URL
    pub url: Option<String>,

    /// Message text
    pub text: Option<String>,

    /// Message title
    pub title: Option<String>,

    /// Extra payload fields, sent in name order
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Transport section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// Verify the webhook's TLS certificate; unset falls back to the default
    pub verify_certificates: Option<bool>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# teams-webhook configuration file

[message]
# Incoming webhook URL (required, here or via --url)
# url = "https://example.webhook.office.com/webhookb2/..."

# Message text (required, here or via --text)
# text = "Hello from teams-webhook"

# Message title
# title = "Notification"

# Extra payload fields, sent after url/text/title in name order
# [message.fields]
# themeColor = "0076D7"

[transport]
# Verify the webhook's TLS certificate (default: false)
# Leaving this off allows a man-in-the-middle to read or alter messages.
# verify_certificates = true

# Request timeout in seconds (default: none)
# timeout = 30
"#
    .to_string()
}
