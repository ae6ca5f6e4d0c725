//! Small egui widgets shared by the shell and the tools.

use eframe::egui;

pub const MUTED: egui::Color32 = egui::Color32::from_rgb(113, 113, 122);
pub const SURFACE: egui::Color32 = egui::Color32::from_rgb(24, 24, 27);
pub const BORDER: egui::Color32 = egui::Color32::from_rgb(39, 39, 42);
pub const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub const WARN_AMBER: egui::Color32 = egui::Color32::from_rgb(251, 191, 36);
pub const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);

/// Full-width sidebar entry. Returns the click response.
pub fn nav_item(
    ui: &mut egui::Ui,
    active: bool,
    icon: &str,
    label: &str,
    hint: Option<&str>,
) -> egui::Response {
    let text = format!("{}  {}", icon, label);
    let rich = if active {
        egui::RichText::new(text).color(egui::Color32::WHITE)
    } else {
        egui::RichText::new(text).color(MUTED)
    };
    let response = ui.add_sized(
        [ui.available_width(), 30.0],
        egui::SelectableLabel::new(active, rich),
    );
    match hint {
        Some(hint) => response.on_hover_text(hint),
        None => response,
    }
}

/// Small uppercase heading between sidebar groups.
pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.horizontal(|ui| {
        ui.add_space(8.0);
        ui.label(egui::RichText::new(text).small().strong().color(MUTED));
    });
    ui.add_space(4.0);
}

/// Outlined monospace pill, used for fetch stats.
pub fn badge(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .stroke(egui::Stroke::new(1.0, BORDER))
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).monospace().small());
        });
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Shorten `s` to `max_chars` characters, the last three being `...` when cut.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}
