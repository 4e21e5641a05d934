//! Configuration for allowlist gates.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional file
//! (format picked from its extension), then `ALLOWLIST__<SECTION>__<KEY>`
//! environment variables.

use allowlist_types::{Hash, Identity};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowlistConfig {
    #[serde(default)]
    pub membership: MembershipConfig,

    #[serde(default)]
    pub signature: SignatureConfig,

    #[serde(default)]
    pub merkle: MerkleConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Membership set configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MembershipConfig {
    /// Administrator allowed to add and remove members
    #[serde(default)]
    pub owner: Option<Identity>,
}

/// Signature gate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Address whose signatures are accepted as credentials
    #[serde(default)]
    pub trusted_signer: Option<Identity>,
}

/// Merkle gate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerkleConfig {
    /// Administrator allowed to rotate the root
    #[serde(default)]
    pub owner: Option<Identity>,

    /// Initial root; unset means every check fails until one is published
    #[serde(default)]
    pub root: Option<Hash>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AllowlistConfig {
    /// Load configuration, layering an optional file and the environment over defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();

        builder = builder.add_source(::config::Config::try_from(&AllowlistConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path));
        }

        // Identities and roots are hex strings; leave them unparsed.
        builder = builder.add_source(
            ::config::Environment::with_prefix("ALLOWLIST")
                .separator("__")
                .try_parsing(false),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
