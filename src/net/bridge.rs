//! The privileged fetch bridge.
//!
//! The host side (`HttpBridge`) performs the real network request with its own
//! timeout and redirect handling and answers with a [`BridgeResponse`], the
//! same narrow shape a sandboxed UI would receive over a message channel. The
//! tool side (`BridgeFetcher`) only ever sees that shape.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::fetch::{FetchError, FetchedPage, PageFetcher};
use crate::config::ToolboxConfig;

/// Wire shape of a bridge fetch answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirected_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeResponse {
    pub fn ok(status_code: u16, redirected_to: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code: Some(status_code),
            redirected_to: Some(redirected_to.into()),
            html: Some(html.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Convert into the tool's fetch outcome.
    ///
    /// A success without a body counts as a failure, reported with the
    /// bridge's own error text when it sent one.
    pub fn into_result(self) -> Result<FetchedPage, FetchError> {
        match self.html {
            Some(html) if self.success && !html.is_empty() => Ok(FetchedPage {
                html,
                final_url: self.redirected_to,
                status: self.status_code,
            }),
            _ => Err(FetchError::Bridge(
                self.error.unwrap_or_else(|| "Fetch failed".to_string()),
            )),
        }
    }
}

/// Host capability: fetch a URL outside the UI's sandbox.
pub trait HostBridge: Send + Sync {
    fn fetch_raw(&self, url: &str) -> BridgeResponse;
}

/// Host-side bridge backed by a blocking reqwest client.
pub struct HttpBridge {
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpBridge {
    pub fn new(config: &ToolboxConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.fetch_timeout_secs,
        })
    }

    fn fetch_inner(&self, url: &str) -> Result<BridgeResponse, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .get(parsed.as_str())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .map_err(|e| self.classify(e, FetchError::Request))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let html = response
            .text()
            .map_err(|e| self.classify(e, FetchError::Body))?;

        Ok(BridgeResponse::ok(status, final_url, html))
    }

    fn classify(&self, e: reqwest::Error, otherwise: fn(String) -> FetchError) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            otherwise(e.to_string())
        }
    }
}

impl HostBridge for HttpBridge {
    fn fetch_raw(&self, url: &str) -> BridgeResponse {
        log::debug!("bridge fetch: {}", url);
        match self.fetch_inner(url) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("bridge fetch failed for {}: {}", url, e);
                BridgeResponse::failed(e.to_string())
            }
        }
    }
}

/// Tool-side fetch path that delegates to a [`HostBridge`].
pub struct BridgeFetcher {
    bridge: Arc<dyn HostBridge>,
}

impl BridgeFetcher {
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        Self { bridge }
    }
}

impl PageFetcher for BridgeFetcher {
    fn fetch(&self, target: &str) -> Result<FetchedPage, FetchError> {
        self.bridge.fetch_raw(target).into_result()
    }

    fn label(&self) -> &'static str {
        "desktop bridge"
    }

    fn is_bridge(&self) -> bool {
        true
    }
}
