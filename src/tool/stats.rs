use std::time::Duration;

use crate::net::{was_redirected, FetchedPage};

/// Display-only numbers shown above a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchStats {
    pub size: String,
    pub time: String,
    pub status: String,
}

impl FetchStats {
    pub fn from_page(page: &FetchedPage, requested: &str, elapsed: Duration) -> Self {
        Self {
            size: format_size(page.html.len()),
            time: format_elapsed(elapsed),
            status: status_summary(page.status, requested, page.final_url.as_deref()),
        }
    }
}

/// Byte count in KiB with two decimals, e.g. `"1.00 KB"`.
pub fn format_size(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Whole milliseconds, e.g. `"153ms"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}ms", (elapsed.as_secs_f64() * 1000.0).round() as u64)
}

/// Status code (200 when none was reported), flagged when redirected.
pub fn status_summary(status: Option<u16>, requested: &str, final_url: Option<&str>) -> String {
    let code = status.unwrap_or(200);
    if was_redirected(requested, final_url) {
        format!("{} (redirected)", code)
    } else {
        code.to_string()
    }
}
