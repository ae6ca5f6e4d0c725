//! Public-proxy fallback used when the desktop bridge is disabled.
//!
//! The proxy answers `GET <endpoint>?url=<target>` with a JSON envelope whose
//! `contents` field carries the target page body. Whatever non-empty string
//! comes back is taken as the page; an error page produced by the proxy
//! itself is indistinguishable from real content.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::fetch::{FetchError, FetchedPage, PageFetcher};
use crate::config::ToolboxConfig;

/// Default relay endpoint.
pub const DEFAULT_PROXY_ENDPOINT: &str = "https://api.allorigins.win/get";

#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    #[serde(default)]
    contents: Option<String>,
}

pub struct ProxyFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl ProxyFetcher {
    pub fn new(config: &ToolboxConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.proxy_endpoint.clone(),
            timeout_secs: config.fetch_timeout_secs,
        })
    }

    /// Proxy request URL for `target`, with the target URL-encoded as `url`.
    pub fn request_url(&self, target: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.endpoint, &[("url", target)])
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }
}

impl PageFetcher for ProxyFetcher {
    fn fetch(&self, target: &str) -> Result<FetchedPage, FetchError> {
        let request_url = self.request_url(target)?;
        log::debug!("proxy fetch: {}", request_url);

        let response = self.client.get(request_url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ProxyStatus(status.as_u16()));
        }

        let body = response.text().map_err(|e| FetchError::Body(e.to_string()))?;
        parse_envelope(&body)
    }

    fn label(&self) -> &'static str {
        "public proxy"
    }
}

/// Extract the page body from a proxy JSON envelope.
pub fn parse_envelope(body: &str) -> Result<FetchedPage, FetchError> {
    let envelope: ProxyEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::ProxyDecode(e.to_string()))?;

    match envelope.contents {
        Some(html) if !html.is_empty() => Ok(FetchedPage {
            html,
            final_url: None,
            status: None,
        }),
        _ => Err(FetchError::NoContent),
    }
}
