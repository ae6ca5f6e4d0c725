//! `ToolboxApp`: the top-level egui application state.
//!
//! This module declares the struct and the frame loop. Drawing is split
//! across the sibling sub-modules:
//!
//! - `sidebar`      : app title and tool navigation
//! - `title_bar`    : breadcrumb, window dragging and window controls
//! - `dashboard`    : tool cards
//! - `fetcher_view` : the HTML fetcher tool

pub mod dashboard;
pub mod fetcher_view;
pub mod sidebar;
pub mod title_bar;

use std::sync::Arc;

use eframe::egui;

use zen_toolbox::config::ToolboxConfig;
use zen_toolbox::format::HtmlFormatter;
use zen_toolbox::net::{select_fetcher, FetchError};
use zen_toolbox::shell::window::{MaximizeEvents, MaximizeSubscription};
use zen_toolbox::shell::{Navigator, ToolId, View};
use zen_toolbox::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use zen_toolbox::tool::HtmlFetcher;

// ─── Application state ───────────────────────────────────────────────────────

pub struct ToolboxApp {
    pub nav: Navigator,
    pub html_fetcher: HtmlFetcher,
    pub maximize_events: MaximizeEvents,
    pub maximize_sub: Option<MaximizeSubscription>,
    pub is_maximized: bool,
}

impl ToolboxApp {
    pub fn new(config: &ToolboxConfig) -> Result<Self, FetchError> {
        let fetcher = select_fetcher(config)?;

        let store: Arc<dyn KeyValueStore> = match config.store_path() {
            Some(path) => {
                log::debug!("storage: {}", path.display());
                Arc::new(JsonFileStore::new(path))
            }
            None => {
                log::warn!("no data directory; last URL will not persist");
                Arc::new(MemoryStore::new())
            }
        };

        let html_fetcher =
            HtmlFetcher::new(fetcher, store, HtmlFormatter::new(config.print_width));

        let mut maximize_events = MaximizeEvents::new();
        let maximize_sub = Some(maximize_events.subscribe());

        Ok(Self {
            nav: Navigator::new(),
            html_fetcher,
            maximize_events,
            maximize_sub,
            is_maximized: false,
        })
    }

    /// Push the native window's maximize state through the event channel and
    /// pick up whatever the title bar subscription received.
    fn sync_window_state(&mut self, ctx: &egui::Context) {
        let maximized = ctx.input(|i| i.viewport().maximized).unwrap_or(false);
        self.maximize_events.publish(maximized);

        if let Some(sub) = &self.maximize_sub {
            if let Some(state) = sub.latest() {
                self.is_maximized = state;
            }
        }
    }

    fn draw_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.nav.view() {
            View::Dashboard => self.draw_dashboard(ui),
            View::Tool(tool) if tool.id == ToolId::HtmlFetcher => {
                self.draw_html_fetcher(ui, ctx)
            }
            View::Tool(_) | View::NotFound => {
                ui.add_space(24.0);
                ui.weak("Tool not found");
            }
        }
    }
}

impl eframe::App for ToolboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.html_fetcher.poll();
        self.sync_window_state(ctx);

        egui::SidePanel::left("sidebar")
            .exact_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_sidebar(ui);
            });

        egui::TopBottomPanel::top("title_bar")
            .exact_height(44.0)
            .show(ctx, |ui| {
                self.draw_title_bar(ui, ctx);
            });

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(8.0);
                    self.draw_view(ui, &ctx_clone);
                });
        });
    }
}

impl Drop for ToolboxApp {
    fn drop(&mut self) {
        if let Some(sub) = self.maximize_sub.take() {
            self.maximize_events.unsubscribe(sub);
        }
    }
}
