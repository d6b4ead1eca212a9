//! Default values for configuration options.

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "teams-webhook.toml";

/// TLS certificates are not verified unless requested.
pub const VERIFY_CERTIFICATES: bool = false;
