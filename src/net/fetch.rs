use thiserror::Error;
use url::Url;

/// A page retrieved by one of the fetch paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Raw response body, decoded as text.
    pub html: String,
    /// Final URL after redirects, when the fetch path reports one.
    pub final_url: Option<String>,
    /// HTTP status code, when the fetch path reports one.
    pub status: Option<u16>,
}

/// Error during fetch. The `Display` text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read body: {0}")]
    Body(String),

    /// Failure reported by the host bridge, carried verbatim.
    #[error("{0}")]
    Bridge(String),

    #[error("HTTP error! status: {0}")]
    ProxyStatus(u16),

    #[error("Invalid proxy response: {0}")]
    ProxyDecode(String),

    #[error("No content returned or URL blocked.")]
    NoContent,
}

/// One of the two retrieval paths (bridge or public proxy).
///
/// Chosen once at startup; the tool calls it from a worker thread.
pub trait PageFetcher: Send + Sync {
    /// Fetch `target`, which has already been normalized by [`normalize_url`].
    fn fetch(&self, target: &str) -> Result<FetchedPage, FetchError>;

    /// Short human-readable name of the path, for logs and the UI.
    fn label(&self) -> &'static str;

    /// Whether this is the privileged bridge path.
    fn is_bridge(&self) -> bool {
        false
    }
}

/// Trim the user input and prepend `https://` when it has no http(s) scheme.
///
/// Returns `None` for blank input.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if has_http_scheme(trimmed) {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether `final_url` names a different resource than `requested`.
///
/// Both sides are compared after URL parsing, so `https://a.com` and
/// `https://a.com/` are the same page. Unparseable URLs fall back to plain
/// string comparison.
pub fn was_redirected(requested: &str, final_url: Option<&str>) -> bool {
    let Some(final_url) = final_url else {
        return false;
    };
    if final_url.is_empty() {
        return false;
    }
    match (Url::parse(requested), Url::parse(final_url)) {
        (Ok(a), Ok(b)) => a != b,
        _ => requested != final_url,
    }
}
