//! Application state shared across all request handlers.

use snapgate_core::config::SharedConfig;
use snapgate_core::gateway::PaymentGateway;
use snapgate_core::store::PaymentStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Payment persistence.
    pub store: Arc<dyn PaymentStore>,
    /// Gateway client (rebuilt on SIGHUP when the gateway section changes).
    pub gateway: Arc<RwLock<Arc<dyn PaymentGateway>>>,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
}

impl AppState {
    /// Create a new AppState.
    pub fn new(
        store: Arc<dyn PaymentStore>,
        gateway: Arc<dyn PaymentGateway>,
        config: SharedConfig,
    ) -> Self {
        Self {
            store,
            gateway: Arc::new(RwLock::new(gateway)),
            config,
        }
    }

    /// The current gateway client.
    pub async fn gateway(&self) -> Arc<dyn PaymentGateway> {
        self.gateway.read().await.clone()
    }

    /// Swap in a new gateway client (used during SIGHUP reload).
    pub async fn replace_gateway(&self, gateway: Arc<dyn PaymentGateway>) {
        let mut current = self.gateway.write().await;
        *current = gateway;
    }
}
