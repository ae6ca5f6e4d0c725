//! HTML fetcher view for `ToolboxApp`.
//!
//! Draws the URL form, the error region, the result toolbar (status, size,
//! time, raw/formatted toggle, copy) and the source viewer.

use eframe::egui;
use zen_toolbox::tool::Clipboard;

use super::ToolboxApp;
use crate::ui::{badge, truncate_str, BORDER, ERROR_RED, MUTED, OK_GREEN, SURFACE, WARN_AMBER};

/// Clipboard writes through the egui context.
struct EguiClipboard<'a>(&'a egui::Context);

impl Clipboard for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) {
        self.0.copy_text(text.to_string());
    }
}

impl ToolboxApp {
    pub fn draw_html_fetcher(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(
            egui::RichText::new("HTML Fetcher")
                .size(18.0)
                .color(egui::Color32::WHITE),
        );
        ui.label(
            egui::RichText::new(
                "Retrieve source code from a URL. Uses the desktop bridge when available; \
                 falls back to a public proxy otherwise.",
            )
            .small()
            .color(MUTED),
        );
        if !self.html_fetcher.uses_bridge() {
            ui.label(
                egui::RichText::new("Desktop bridge disabled: requests go through the public proxy.")
                    .small()
                    .color(WARN_AMBER),
            );
        }
        ui.add_space(12.0);

        self.draw_fetch_form(ui, ctx);

        if let Some(error) = self.html_fetcher.error() {
            ui.add_space(8.0);
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(40, 14, 14))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 24, 24)))
                .rounding(6.0)
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(error).monospace().small().color(ERROR_RED));
                });
        }

        if self.html_fetcher.content().is_none() {
            return;
        }

        ui.add_space(12.0);
        self.draw_result_toolbar(ui, ctx);
        ui.add_space(6.0);
        self.draw_source_view(ui);
    }

    fn draw_fetch_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::Frame::none()
            .fill(SURFACE)
            .stroke(egui::Stroke::new(1.0, BORDER))
            .rounding(8.0)
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Target URL").small().color(MUTED));
                ui.horizontal(|ui| {
                    let loading = self.html_fetcher.loading();
                    let mut url = self.html_fetcher.url().to_string();

                    let response = ui.add_enabled(
                        !loading,
                        egui::TextEdit::singleline(&mut url)
                            .hint_text("example.com")
                            .font(egui::TextStyle::Monospace)
                            .desired_width(ui.available_width() - 150.0),
                    );
                    if response.changed() {
                        self.html_fetcher.set_url(url);
                    }
                    let enter =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    if loading {
                        ui.spinner();
                        ui.label(egui::RichText::new("Connecting...").small().color(MUTED));
                    }

                    let clicked = ui
                        .add_enabled(
                            self.html_fetcher.can_submit(),
                            egui::Button::new("Fetch").min_size(egui::vec2(64.0, 24.0)),
                        )
                        .clicked();

                    if clicked || enter {
                        let repaint = ctx.clone();
                        self.html_fetcher.submit(move || repaint.request_repaint());
                    }
                });
            });
    }

    fn draw_result_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let status = self
                .html_fetcher
                .stats()
                .map_or_else(|| "200 OK".to_string(), |s| s.status.clone());
            ui.colored_label(OK_GREEN, "●");
            ui.label(egui::RichText::new(status).monospace().small());

            if let Some(stats) = self.html_fetcher.stats() {
                badge(ui, &stats.size);
                badge(ui, &stats.time);
            }

            ui.add_space(12.0);
            let formatted = self.html_fetcher.show_formatted();
            if ui.selectable_label(!formatted, "Raw").clicked() {
                self.html_fetcher.set_show_formatted(false);
            }
            if ui
                .add_enabled(
                    self.html_fetcher.has_formatted(),
                    egui::SelectableLabel::new(formatted, "Formatted"),
                )
                .clicked()
            {
                self.html_fetcher.set_show_formatted(true);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Copy").clicked() {
                    self.html_fetcher.copy(&mut EguiClipboard(ctx));
                }
                ui.label(egui::RichText::new(self.html_fetcher.fetch_path()).small().color(MUTED));
            });
        });
    }

    fn draw_source_view(&self, ui: &mut egui::Ui) {
        let Some(text) = self.html_fetcher.displayed_text() else {
            return;
        };

        egui::Frame::none()
            .fill(egui::Color32::from_rgb(13, 13, 13))
            .stroke(egui::Stroke::new(1.0, BORDER))
            .rounding(8.0)
            .inner_margin(egui::Margin::same(8.0))
            .show(ui, |ui| {
                let source = self.html_fetcher.source_url().unwrap_or("source.html");
                ui.label(egui::RichText::new(truncate_str(source, 72)).monospace().small().color(MUTED))
                    .on_hover_text(source);
                ui.separator();

                egui::ScrollArea::both()
                    .id_salt("source_view")
                    .max_height(500.0)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        // Read-only: a &str buffer can be selected but not edited.
                        let mut view = text;
                        ui.add(
                            egui::TextEdit::multiline(&mut view)
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                    });

                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let small = |s: String| egui::RichText::new(s).monospace().small().color(MUTED);
                    ui.label(small(format!("Ln {}", self.html_fetcher.line_count())));
                    ui.label(small("HTML".to_string()));
                    ui.label(small("UTF-8".to_string()));
                });
            });
    }
}
