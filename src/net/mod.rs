pub mod bridge;
pub mod fetch;
pub mod proxy;

use std::sync::Arc;

pub use bridge::{BridgeFetcher, BridgeResponse, HostBridge, HttpBridge};
pub use fetch::{normalize_url, was_redirected, FetchError, FetchedPage, PageFetcher};
pub use proxy::ProxyFetcher;

use crate::config::ToolboxConfig;

/// Pick the fetch path once, at startup.
///
/// The bridge is used whenever it is enabled and constructible; otherwise the
/// public proxy takes over.
pub fn select_fetcher(config: &ToolboxConfig) -> Result<Arc<dyn PageFetcher>, FetchError> {
    if config.use_bridge {
        match HttpBridge::new(config) {
            Ok(bridge) => {
                log::info!("fetch path: desktop bridge");
                return Ok(Arc::new(BridgeFetcher::new(Arc::new(bridge))));
            }
            Err(e) => log::warn!("desktop bridge unavailable ({}), using proxy", e),
        }
    }

    log::info!("fetch path: public proxy ({})", config.proxy_endpoint);
    Ok(Arc::new(ProxyFetcher::new(config)?))
}
