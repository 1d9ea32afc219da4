//! TOML file configuration structures.
//!
//! These structs directly map to the `snapgate-config.toml` file format.
//! Every section is optional; missing values fall back to defaults.

use serde::Deserialize;
use snapgate_core::config::{DEFAULT_ENABLED_PAYMENTS, GatewayEnvironment};
use snapgate_sdk::objects::PaymentStatus;
use std::collections::HashMap;
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Gateway configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub environment: GatewayEnvironment,
    /// The merchant server key. Usually supplied through
    /// `MIDTRANS_SERVER_KEY` instead of the file.
    #[serde(default)]
    pub server_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub snap_base_url: Option<Url>,
    #[serde(default)]
    pub api_base_url: Option<Url>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            environment: GatewayEnvironment::default(),
            server_key: None,
            timeout_secs: default_timeout_secs(),
            snap_base_url: None,
            api_base_url: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Checkout configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_enabled_payments")]
    pub enabled_payments: Vec<String>,
    /// Extra or redirected gateway statuses, on top of the six defaults.
    #[serde(default)]
    pub status_mapping: HashMap<String, PaymentStatus>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            enabled_payments: default_enabled_payments(),
            status_mapping: HashMap::new(),
        }
    }
}

fn default_enabled_payments() -> Vec<String> {
    DEFAULT_ENABLED_PAYMENTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[gateway]
environment = "production"
server_key = "Mid-server-abc"
timeout_secs = 10
api_base_url = "http://127.0.0.1:9000"

[checkout]
enabled_payments = ["gopay", "bca_va"]

[checkout.status_mapping]
failure = "deny"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.gateway.environment, GatewayEnvironment::Production);
        assert_eq!(config.gateway.server_key.as_deref(), Some("Mid-server-abc"));
        assert_eq!(config.gateway.timeout_secs, 10);
        assert!(config.gateway.snap_base_url.is_none());
        assert_eq!(config.checkout.enabled_payments, vec!["gopay", "bca_va"]);
        assert_eq!(
            config.checkout.status_mapping.get("failure"),
            Some(&PaymentStatus::Deny)
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.gateway.environment, GatewayEnvironment::Sandbox);
        assert!(config.gateway.server_key.is_none());
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(
            config.checkout.enabled_payments,
            vec!["credit_card", "bca_va", "bni_va", "bri_va"]
        );
        assert!(config.checkout.status_mapping.is_empty());
    }

    #[test]
    fn test_unknown_mapped_status_is_rejected() {
        let toml_str = r#"
[checkout.status_mapping]
refund = "refunded"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
