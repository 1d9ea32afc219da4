//! Configuration module for snapgate-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::FileConfig;
use snapgate_core::config::{
    CheckoutConfig, GatewayConfig, ServerConfig, SharedConfig, StatusMapping,
};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("gateway server key not set (use MIDTRANS_SERVER_KEY, --server-key or [gateway] server_key)")]
    MissingServerKey,

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub checkout: CheckoutConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.server, self.gateway, self.checkout)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
    server_key_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        listen_override: Option<SocketAddr>,
        server_key_override: Option<String>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
            server_key_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI / environment overrides
    /// 3. Validate the configuration
    /// 4. Build the runtime configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        if let Some(server_key) = &self.server_key_override {
            file_config.gateway.server_key = Some(server_key.clone());
        }

        let server_key = self.validate(&file_config)?;

        Ok(build_loaded_config(file_config, server_key))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    /// Validate the file and return the server key.
    fn validate(&self, config: &FileConfig) -> Result<String, ConfigError> {
        let server_key = config
            .gateway
            .server_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingServerKey)?;

        if config.gateway.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if config.checkout.enabled_payments.is_empty() {
            return Err(ConfigError::ValidationError(
                "checkout.enabled_payments must not be empty".to_string(),
            ));
        }
        if let Some(blank) = config
            .checkout
            .enabled_payments
            .iter()
            .find(|method| method.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(format!(
                "checkout.enabled_payments contains a blank entry: {blank:?}"
            )));
        }

        Ok(server_key.to_owned())
    }
}

fn build_loaded_config(file_config: FileConfig, server_key: String) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        gateway: GatewayConfig {
            environment: file_config.gateway.environment,
            server_key,
            timeout: Duration::from_secs(file_config.gateway.timeout_secs),
            snap_base_url: file_config.gateway.snap_base_url,
            api_base_url: file_config.gateway.api_base_url,
        },
        checkout: CheckoutConfig {
            enabled_payments: file_config.checkout.enabled_payments,
            status_mapping: StatusMapping::with_overrides(file_config.checkout.status_mapping),
        },
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapgate_core::config::GatewayEnvironment;
    use snapgate_core::entities::PaymentStatus;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_server_key_in_file() {
        let file = write_config(
            r#"
[gateway]
server_key = "SB-Mid-server-file"

[checkout.status_mapping]
failure = "deny"
"#,
        );
        let loaded = ConfigLoader::new(file.path(), None, None).load().unwrap();

        assert_eq!(loaded.gateway.server_key, "SB-Mid-server-file");
        assert_eq!(loaded.gateway.environment, GatewayEnvironment::Sandbox);
        assert_eq!(loaded.gateway.timeout, Duration::from_secs(30));
        assert_eq!(
            loaded.checkout.status_mapping.resolve("failure"),
            Some(PaymentStatus::Deny)
        );
        assert_eq!(
            loaded.checkout.status_mapping.resolve("settlement"),
            Some(PaymentStatus::Settlement)
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_config(
            r#"
[server]
listen = "127.0.0.1:3000"

[gateway]
server_key = "from-file"
"#,
        );
        let listen: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let loaded = ConfigLoader::new(file.path(), Some(listen), Some("from-env".to_string()))
            .load()
            .unwrap();

        assert_eq!(loaded.server.listen, listen);
        assert_eq!(loaded.gateway.server_key, "from-env");
    }

    #[test]
    fn test_missing_server_key() {
        let file = write_config("[gateway]\nserver_key = \"  \"\n");
        let err = ConfigLoader::new(file.path(), None, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::MissingServerKey));
    }

    #[test]
    fn test_validation_errors() {
        for content in [
            "[gateway]\nserver_key = \"k\"\ntimeout_secs = 0\n",
            "[gateway]\nserver_key = \"k\"\n[checkout]\nenabled_payments = []\n",
            "[gateway]\nserver_key = \"k\"\n[checkout]\nenabled_payments = [\"gopay\", \"\"]\n",
        ] {
            let file = write_config(content);
            let err = ConfigLoader::new(file.path(), None, None).load().unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{content}");
        }
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new("/nonexistent/snapgate-config.toml", None, None)
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
