//! Gateway connection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use snapgate_sdk::client::{GatewayEndpoints, GatewayError, MidtransClient};
use url::Url;

/// Which gateway deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    #[default]
    Sandbox,
    Production,
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub environment: GatewayEnvironment,
    /// Merchant server key used for Basic auth and notification signatures.
    pub server_key: String,
    /// Per-request timeout for outbound calls.
    pub timeout: Duration,
    /// Overrides the Snap API base URL of `environment`.
    pub snap_base_url: Option<Url>,
    /// Overrides the Core API base URL of `environment`.
    pub api_base_url: Option<Url>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("environment", &self.environment)
            .field("server_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("snap_base_url", &self.snap_base_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl GatewayConfig {
    /// Base URLs for `environment`, with any overrides applied.
    pub fn endpoints(&self) -> Result<GatewayEndpoints, url::ParseError> {
        let mut endpoints = match self.environment {
            GatewayEnvironment::Sandbox => GatewayEndpoints::sandbox()?,
            GatewayEnvironment::Production => GatewayEndpoints::production()?,
        };
        if let Some(url) = &self.snap_base_url {
            endpoints.snap_base_url = url.clone();
        }
        if let Some(url) = &self.api_base_url {
            endpoints.api_base_url = url.clone();
        }
        Ok(endpoints)
    }

    /// Build a gateway client with this configuration.
    pub fn build_client(&self) -> Result<MidtransClient, GatewayError> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(MidtransClient::new(self.endpoints()?, self.server_key.clone()).with_http_client(http))
    }
}
