pub mod html_fetcher;
pub mod stats;

pub use html_fetcher::{FetchReport, HtmlFetcher, RenderedPage, STORAGE_KEY};
pub use stats::FetchStats;

/// Write-only system clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str);
}
