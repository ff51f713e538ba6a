use std::{sync::Arc, time::Duration};

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::{
    errors::GatewayError,
    gateway::{CallContext, PoolGateway},
    models::PoolSnapshot,
};

/// Deadline applied to a request when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Entry point for callers that only have an address string.
///
/// Validates the input, binds the fetch to a fresh deadline and, when set, a
/// shutdown token, then hands off to the gateway. Errors are logged and
/// returned unchanged so the boundary can map them by
/// [`kind`](GatewayError::kind).
#[derive(Clone)]
pub struct PoolService {
    gateway: Arc<dyn PoolGateway>,
    request_timeout: Duration,
    shutdown: Option<CancellationToken>,
}

impl PoolService {
    pub fn new(gateway: Arc<dyn PoolGateway>, request_timeout: Duration) -> Self {
        Self {
            gateway,
            request_timeout,
            shutdown: None,
        }
    }

    /// Cancel in-flight fetches when `shutdown` is cancelled.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub async fn get_pool_data(&self, pool_address: &str) -> Result<PoolSnapshot, GatewayError> {
        if pool_address.trim().is_empty() {
            return Err(GatewayError::InvalidInput(
                "pool address is required".to_string(),
            ));
        }

        let mut ctx = CallContext::with_timeout(self.request_timeout);
        if let Some(shutdown) = &self.shutdown {
            ctx = ctx.with_cancellation(shutdown.child_token());
        }

        match self.gateway.get_pool_data(&ctx, pool_address).await {
            Ok(snapshot) => {
                info!(
                    "Fetched pool {} ({}) at block {}",
                    snapshot.address, snapshot.symbol, snapshot.block_number
                );
                Ok(snapshot)
            },
            Err(e) => {
                warn!("Failed to get pool data for {pool_address}: {e}");
                Err(e)
            },
        }
    }

    /// Fetch several pools concurrently. Results keep the input order.
    pub async fn get_many(
        &self,
        pool_addresses: &[String],
    ) -> Vec<Result<PoolSnapshot, GatewayError>> {
        let fetches = pool_addresses
            .iter()
            .map(|address| self.get_pool_data(address));

        futures::future::join_all(fetches).await
    }
}
