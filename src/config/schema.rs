//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Every field has a default so a minimal config stays minimal; the
//! two credentials have no usable default and are validated by the loader.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Application-key gate for the HTTP surface.
    pub auth: AuthConfig,

    /// Remote ledger platform endpoint and credential.
    pub platform: PlatformConfig,

    /// Startup provisioning settings.
    pub provisioner: ProvisionerConfig,

    /// Custodial wallet polling settings.
    pub wallet: WalletConfig,

    /// Runtime token operation settings.
    pub operations: OperationsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ListenerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Application-key gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Key presented by callers as `Authorization: Bearer <key>`.
    /// Usually supplied via the `MINTGATE_APP_KEY` environment variable.
    pub app_key: String,
}

/// Remote ledger platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Platform GraphQL endpoint URL.
    pub api_url: String,

    /// Authorization credential attached to every platform call.
    /// Usually supplied via the `MINTGATE_PLATFORM_API_KEY` environment
    /// variable.
    pub api_key: String,

    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl PlatformConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Startup provisioning configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Path of the durable state file holding the collection id.
    pub state_path: String,

    /// Interval between finalization polls in milliseconds.
    pub poll_interval_ms: u64,

    /// Delay after submitting a mutation before the first poll, giving the
    /// platform time to register the request, in milliseconds.
    pub settle_delay_ms: u64,

    /// Collection display name.
    pub collection_name: String,

    /// Collection banner image URL.
    pub collection_banner_image: String,

    /// Collection media descriptor (JSON array).
    pub collection_media: String,

    /// Recipient of each token's initial supply.
    pub default_recipient: String,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            state_path: "state.toml".to_string(),
            poll_interval_ms: 10_000,
            settle_delay_ms: 10_000,
            collection_name: "Sample Game".to_string(),
            collection_banner_image:
                "https://cdn.enjin.io/mint/image/sample-game-collection-banner.png".to_string(),
            collection_media:
                "[{\"type\":\"image/png\",\"url\":\"https://cdn.enjin.io/mint/image/sample-game-collection-image.png\"}]"
                    .to_string(),
            default_recipient: "5EJDmqEoySnLk8xvPNPQGrb9qUrYLcbf38K4R6zKeNryvfD6".to_string(),
        }
    }
}

impl ProvisionerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Custodial wallet polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Maximum number of re-queries after submitting wallet creation.
    pub poll_attempts: u32,

    /// Interval between re-queries in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            poll_attempts: 10,
            poll_interval_ms: 1_000,
        }
    }
}

impl WalletConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Runtime token operation configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OperationsConfig {
    /// When true, mint/burn/transfer wait for finalization before
    /// acknowledging; when false (default) the submission's acceptance is
    /// the acknowledgment.
    pub await_finalization: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
