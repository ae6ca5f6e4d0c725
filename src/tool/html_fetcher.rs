//! The HTML fetcher tool: URL input, one fetch at a time, raw/formatted view.
//!
//! A submission runs the selected [`PageFetcher`] on a worker thread and
//! hands the result back through a channel. [`HtmlFetcher::poll`] applies it
//! on the UI thread in one step, so the view never shows a half-updated state.

use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::format::{FormatError, HtmlFormatter};
use crate::net::{normalize_url, FetchError, FetchedPage, PageFetcher};
use crate::storage::KeyValueStore;

use super::stats::FetchStats;
use super::Clipboard;

/// Store key for the last URL typed into the tool.
pub const STORAGE_KEY: &str = "htmlFetcher:lastUrl";

/// A fetched page plus the formatter's attempt at it.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: FetchedPage,
    pub formatted: Result<String, FormatError>,
}

/// Everything one fetch attempt produced.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub target: String,
    pub elapsed: Duration,
    pub outcome: Result<RenderedPage, FetchError>,
}

impl FetchReport {
    /// Fetch `target` and format the body. Elapsed time covers the fetch only.
    pub fn run(fetcher: &dyn PageFetcher, formatter: &HtmlFormatter, target: &str) -> Self {
        let start = Instant::now();
        let result = fetcher.fetch(target);
        let elapsed = start.elapsed();

        let outcome = result.map(|page| {
            let formatted = formatter.try_format(&page.html);
            RenderedPage { page, formatted }
        });

        Self {
            target: target.to_string(),
            elapsed,
            outcome,
        }
    }
}

pub struct HtmlFetcher {
    url: String,
    content: Option<String>,
    source_url: Option<String>,
    formatted: Option<String>,
    show_formatted: bool,
    loading: bool,
    error: Option<String>,
    stats: Option<FetchStats>,
    fetcher: Arc<dyn PageFetcher>,
    formatter: HtmlFormatter,
    store: Arc<dyn KeyValueStore>,
    fetch_rx: Option<mpsc::Receiver<FetchReport>>,
}

impl HtmlFetcher {
    /// Build the tool, pre-populating the URL from the store when possible.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn KeyValueStore>,
        formatter: HtmlFormatter,
    ) -> Self {
        let url = match store.get(STORAGE_KEY) {
            Ok(Some(cached)) => cached,
            Ok(None) => String::new(),
            Err(e) => {
                log::debug!("could not read last URL: {}", e);
                String::new()
            }
        };

        Self {
            url,
            content: None,
            source_url: None,
            formatted: None,
            show_formatted: false,
            loading: false,
            error: None,
            stats: None,
            fetcher,
            formatter,
            store,
            fetch_rx: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Update the URL field and persist it. Storage failures are ignored.
    pub fn set_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        if url == self.url {
            return;
        }
        self.url = url;
        if let Err(e) = self.store.set(STORAGE_KEY, &self.url) {
            log::debug!("could not persist last URL: {}", e);
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.url.trim().is_empty()
    }

    /// Reset state for a new attempt and return the normalized target.
    fn begin(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        let target = normalize_url(&self.url)?;

        self.loading = true;
        self.error = None;
        self.content = None;
        self.source_url = None;
        self.formatted = None;
        self.show_formatted = false;
        self.stats = None;
        log::info!("fetching {} via {}", target, self.fetcher.label());
        Some(target)
    }

    /// Start a fetch on a worker thread. `on_done` runs on that thread once the
    /// result is ready (the UI uses it to request a repaint).
    ///
    /// Returns false when nothing was started (empty URL or already loading).
    pub fn submit<F>(&mut self, on_done: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(target) = self.begin() else {
            return false;
        };

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let fetcher = Arc::clone(&self.fetcher);
        let formatter = self.formatter;
        std::thread::spawn(move || {
            let report = FetchReport::run(fetcher.as_ref(), &formatter, &target);
            let _ = tx.send(report);
            on_done();
        });
        true
    }

    /// Apply a finished fetch, if one arrived. Returns true when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.fetch_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(report) => {
                self.fetch_rx = None;
                self.apply(report);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.fetch_rx = None;
                self.loading = false;
                self.error = Some("Fetch worker stopped unexpectedly".to_string());
                true
            }
        }
    }

    /// Set the URL and fetch it on the calling thread.
    pub fn fetch_blocking(&mut self, raw_input: &str) -> bool {
        self.set_url(raw_input);
        let Some(target) = self.begin() else {
            return false;
        };
        let report = FetchReport::run(self.fetcher.as_ref(), &self.formatter, &target);
        self.apply(report);
        true
    }

    pub fn apply(&mut self, report: FetchReport) {
        self.loading = false;
        match report.outcome {
            Ok(rendered) => {
                let stats = FetchStats::from_page(&rendered.page, &report.target, report.elapsed);
                log::info!(
                    "fetched {} ({}, {}, {})",
                    report.target,
                    stats.status,
                    stats.size,
                    stats.time
                );

                let (formatted, show_formatted) = match rendered.formatted {
                    Ok(pretty) if !pretty.is_empty() => (Some(pretty), true),
                    _ => (None, false),
                };
                self.source_url = Some(rendered.page.final_url.unwrap_or(report.target));
                self.content = Some(rendered.page.html);
                self.formatted = formatted;
                self.show_formatted = show_formatted;
                self.stats = Some(stats);
                self.error = None;
            }
            Err(e) => {
                log::warn!("fetch of {} failed: {}", report.target, e);
                self.content = None;
                self.source_url = None;
                self.formatted = None;
                self.show_formatted = false;
                self.stats = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Option<&FetchStats> {
        self.stats.as_ref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The formatted body; the raw body when formatting failed.
    /// Where the displayed content came from: the final URL after redirects
    /// when the fetch path reports one, the requested target otherwise.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref().or(self.content.as_deref())
    }

    pub fn has_formatted(&self) -> bool {
        self.formatted.is_some()
    }

    pub fn show_formatted(&self) -> bool {
        self.show_formatted
    }

    /// Switch between raw and formatted view. Formatted is only selectable
    /// when formatting succeeded.
    pub fn set_show_formatted(&mut self, formatted: bool) {
        self.show_formatted = formatted && self.formatted.is_some();
    }

    /// Whatever the view currently shows.
    pub fn displayed_text(&self) -> Option<&str> {
        match (&self.formatted, self.show_formatted) {
            (Some(pretty), true) => Some(pretty),
            _ => self.content.as_deref(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.displayed_text().map_or(0, |t| t.lines().count())
    }

    /// Copy the displayed text. Does nothing without content.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> bool {
        match self.displayed_text() {
            Some(text) => {
                clipboard.write_text(text);
                true
            }
            None => false,
        }
    }

    pub fn fetch_path(&self) -> &'static str {
        self.fetcher.label()
    }

    pub fn uses_bridge(&self) -> bool {
        self.fetcher.is_bridge()
    }
}
