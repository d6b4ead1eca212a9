//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::message::field;
use crate::webhook::{CertificateVerification, TransportOptions};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// A payload field: name and optional (null) value.
pub type FieldEntry = (String, Option<String>);

/// Fully validated configuration ready for use by the application.
///
/// Required message fields are not checked here: an incomplete field list
/// is reported by the message's own validation when it is built.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Message fields in payload order
    pub fields: Vec<FieldEntry>,

    /// Transport settings for the HTTP client
    pub transport: TransportOptions,

    /// Dry-run mode (print the payload without sending)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|(name, _)| name.as_str()).collect();
        let timeout = self
            .transport
            .timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));

        write!(
            f,
            "Config {{ fields: [{}], verify_certificates: {}, timeout: {}, dry_run: {} }}",
            names.join(", "),
            self.transport.certificate_verification.is_enabled(),
            timeout,
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `--field` argument is not `Key=Value`
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let fields = Self::resolve_fields(cli, toml)?;
        let transport = Self::resolve_transport(cli, toml)?;

        Ok(Self {
            fields,
            transport,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_fields(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Vec<FieldEntry>, ConfigError> {
        let section = toml.map(|t| &t.message);
        let mut fields = Vec::new();

        // Well-known fields first: CLI explicit > TOML
        let known = [
            (field::URL, cli.url.as_deref(), section.and_then(|s| s.url.as_deref())),
            (field::TEXT, cli.text.as_deref(), section.and_then(|s| s.text.as_deref())),
            (field::TITLE, cli.title.as_deref(), section.and_then(|s| s.title.as_deref())),
        ];
        for (name, from_cli, from_toml) in known {
            if let Some(value) = from_cli.or(from_toml) {
                upsert(&mut fields, name, Some(value.to_string()));
            }
        }

        if let Some(section) = section {
            for (name, value) in &section.fields {
                upsert(&mut fields, name, Some(value.clone()));
            }
        }

        // CLI fields override TOML fields in place
        for raw in &cli.fields {
            let (name, value) = parse_field_string(raw)?;
            upsert(&mut fields, name, Some(value.to_string()));
        }

        for name in &cli.null_fields {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidField {
                    value: name.clone(),
                });
            }
            upsert(&mut fields, name.trim(), None);
        }

        Ok(fields)
    }

    fn resolve_transport(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<TransportOptions, ConfigError> {
        let transport = toml.map(|t| &t.transport);

        // The CLI flag only enables; otherwise TOML, then the default
        let verify = cli.verify_certificates
            || transport
                .and_then(|t| t.verify_certificates)
                .unwrap_or(defaults::VERIFY_CERTIFICATES);

        let mode = if verify {
            CertificateVerification::Enabled
        } else {
            CertificateVerification::Disabled
        };
        let mut options = TransportOptions::new().with_certificate_verification(mode);

        // Priority: CLI explicit > TOML > no timeout
        if let Some(seconds) = cli.timeout.or_else(|| transport.and_then(|t| t.timeout)) {
            if seconds == 0 {
                return Err(ConfigError::InvalidDuration {
                    field: "timeout",
                    reason: "must be greater than 0".to_string(),
                });
            }
            options = options.with_timeout(Duration::from_secs(seconds));
        }

        Ok(options)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn upsert(fields: &mut Vec<FieldEntry>, name: &str, value: Option<String>) {
    match fields.iter_mut().find(|(existing, _)| existing == name) {
        Some(entry) => entry.1 = value,
        None => fields.push((name.to_string(), value)),
    }
}

fn parse_field_string(s: &str) -> Result<(&str, &str), ConfigError> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(ConfigError::InvalidField {
            value: s.to_string(),
        }),
    }
}
