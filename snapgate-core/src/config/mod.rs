//! Runtime configuration types for Snapgate.
//!
//! These types represent the validated runtime configuration used by the
//! server. The actual config loading/parsing is handled by the server crate.

mod checkout;
mod gateway;
mod server;

pub use checkout::{CheckoutConfig, DEFAULT_ENABLED_PAYMENTS, StatusMapping};
pub use gateway::{GatewayConfig, GatewayEnvironment};
pub use server::ServerConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with separate locks for each section.
///
/// This allows independent access to different configuration sections
/// without blocking other readers/writers.
#[derive(Clone)]
pub struct SharedConfig {
    /// Server configuration (listen address).
    pub server: Arc<RwLock<ServerConfig>>,
    /// Gateway connection settings.
    pub gateway: Arc<RwLock<GatewayConfig>>,
    /// Enabled payment methods and the status mapping.
    pub checkout: Arc<RwLock<CheckoutConfig>>,
}

impl SharedConfig {
    pub fn new(server: ServerConfig, gateway: GatewayConfig, checkout: CheckoutConfig) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            gateway: Arc::new(RwLock::new(gateway)),
            checkout: Arc::new(RwLock::new(checkout)),
        }
    }
}
