//! Tests for validated configuration.

use std::io::Write;
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};
use crate::webhook::CertificateVerification;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["teams-webhook"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

fn names(config: &ValidatedConfig) -> Vec<&str> {
    config.fields.iter().map(|(name, _)| name.as_str()).collect()
}

fn value<'a>(config: &'a ValidatedConfig, name: &str) -> Option<Option<&'a str>> {
    config
        .fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_deref())
}

mod fields {
    use super::*;

    #[test]
    fn known_fields_come_first() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--field",
                "themeColor=0076D7",
                "--title",
                "CI",
                "--text",
                "hi",
                "--url",
                "https://example.com/hook",
            ]),
            None,
        )
        .unwrap();

        assert_eq!(names(&config), ["url", "text", "title", "themeColor"]);
    }

    #[test]
    fn missing_required_fields_are_left_to_the_message() {
        let config = ValidatedConfig::from_raw(&cli(&["--title", "only"]), None).unwrap();

        assert_eq!(names(&config), ["title"]);
    }

    #[test]
    fn cli_overrides_toml_known_fields() {
        let toml = toml(
            r#"
            [message]
            url = "https://example.com/toml"
            text = "from toml"
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--text", "from cli"]), Some(&toml)).unwrap();

        assert_eq!(value(&config, "url"), Some(Some("https://example.com/toml")));
        assert_eq!(value(&config, "text"), Some(Some("from cli")));
    }

    #[test]
    fn cli_field_replaces_toml_field_in_place() {
        let toml = toml(
            r#"
            [message]
            text = "hi"

            [message.fields]
            alpha = "1"
            beta = "2"
        "#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--field", "alpha=override"]), Some(&toml)).unwrap();

        assert_eq!(names(&config), ["text", "alpha", "beta"]);
        assert_eq!(value(&config, "alpha"), Some(Some("override")));
    }

    #[test]
    fn field_value_may_contain_equals_and_be_empty() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--field", "query=a=b", "--field", "empty="]),
            None,
        )
        .unwrap();

        assert_eq!(value(&config, "query"), Some(Some("a=b")));
        assert_eq!(value(&config, "empty"), Some(Some("")));
    }

    #[test]
    fn null_fields_are_sent_as_null() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--text", "hi", "--null-field", "subtitle", "--null-field", "text"]),
            None,
        )
        .unwrap();

        assert_eq!(names(&config), ["text", "subtitle"]);
        assert_eq!(value(&config, "text"), Some(None));
        assert_eq!(value(&config, "subtitle"), Some(None));
    }

    #[test]
    fn malformed_field_is_error() {
        for raw in ["no-equals", "=value", "  =value"] {
            let result = ValidatedConfig::from_raw(&cli(&["--field", raw]), None);

            assert!(
                matches!(result, Err(ConfigError::InvalidField { ref value }) if value == raw),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn blank_null_field_is_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--null-field", " "]), None);

        assert!(matches!(result, Err(ConfigError::InvalidField { .. })));
    }
}

mod transport {
    use super::*;

    #[test]
    fn verification_disabled_by_default() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert_eq!(
            config.transport.certificate_verification,
            CertificateVerification::Disabled
        );
        assert!(config.transport.timeout.is_none());
    }

    #[test]
    fn verification_enabled_by_either_source() {
        let from_cli = ValidatedConfig::from_raw(&cli(&["--verify-certificates"]), None).unwrap();
        let from_toml = ValidatedConfig::from_raw(
            &cli(&[]),
            Some(&toml("[transport]\nverify_certificates = true")),
        )
        .unwrap();

        assert!(from_cli.transport.certificate_verification.is_enabled());
        assert!(from_toml.transport.certificate_verification.is_enabled());
    }

    #[test]
    fn explicit_false_in_toml_keeps_verification_off() {
        let config = ValidatedConfig::from_raw(
            &cli(&[]),
            Some(&toml("[transport]\nverify_certificates = false")),
        )
        .unwrap();

        assert_eq!(
            config.transport.certificate_verification,
            CertificateVerification::Disabled
        );
    }

    #[test]
    fn cli_flag_overrides_false_in_toml() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--verify-certificates"]),
            Some(&toml("[transport]\nverify_certificates = false")),
        )
        .unwrap();

        assert!(config.transport.certificate_verification.is_enabled());
    }

    #[test]
    fn unset_in_toml_falls_back_to_default() {
        let config =
            ValidatedConfig::from_raw(&cli(&[]), Some(&toml("[transport]\ntimeout = 5"))).unwrap();

        assert_eq!(
            config.transport.certificate_verification.is_enabled(),
            crate::config::defaults::VERIFY_CERTIFICATES
        );
    }

    #[test]
    fn cli_timeout_overrides_toml() {
        let toml = toml("[transport]\ntimeout = 30");

        let from_toml = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        let from_cli = ValidatedConfig::from_raw(&cli(&["--timeout", "5"]), Some(&toml)).unwrap();

        assert_eq!(from_toml.transport.timeout, Some(Duration::from_secs(30)));
        assert_eq!(from_cli.transport.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_timeout_is_error() {
        let result = ValidatedConfig::from_raw(&cli(&["--timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[message]\nurl = \"https://example.com/hook\"\ntext = \"from file\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(value(&config, "text"), Some(Some("from file")));
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_without_config_uses_cli_only() {
        let config = ValidatedConfig::load(&cli(&["--text", "hi", "--dry-run", "-v"])).unwrap();

        assert_eq!(names(&config), ["text"]);
        assert!(config.dry_run);
        assert!(config.verbose);
    }

    #[test]
    fn write_default_config_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("teams-webhook.toml");

        write_default_config(&path).unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert!(config.fields.is_empty());
    }

    #[test]
    fn write_default_config_to_missing_dir_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("config.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_lists_field_names_not_values() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--url", "https://example.com/secret-token", "--text", "hi", "--timeout", "9"]),
            None,
        )
        .unwrap();

        let shown = config.to_string();
        assert!(shown.contains("fields: [url, text]"));
        assert!(shown.contains("timeout: 9s"));
        assert!(!shown.contains("secret-token"));
    }
}
