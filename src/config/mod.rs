//! Configuration layer for the `teams-webhook` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file**
//! 3. **Built-in defaults**
//!
//! # Field Order
//!
//! The payload lists `url`, `text` and `title` first, then the TOML
//! `[message.fields]` table in name order, then `--field` values. A
//! `--field` naming an existing field replaces its value in place.
//! `--null-field` names are sent as JSON `null`.
//!
//! # Boolean Flag Semantics
//!
//! `--verify-certificates` can only enable verification. Without it,
//! `transport.verify_certificates` decides, and an unset value falls back
//! to [`defaults::VERIFY_CERTIFICATES`].

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{MessageSection, TomlConfig, TransportSection, default_config_template};
pub use validated::{FieldEntry, ValidatedConfig, write_default_config};
