use eframe::egui;
use zen_toolbox::shell::{COMING_SOON, TOOLS};

use super::ToolboxApp;
use crate::ui::{BORDER, MUTED, OK_GREEN, SURFACE};

const CARD_SIZE: egui::Vec2 = egui::vec2(260.0, 120.0);

impl ToolboxApp {
    pub fn draw_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new("Welcome back")
                .size(24.0)
                .strong()
                .color(egui::Color32::WHITE),
        );
        ui.label(egui::RichText::new("Select a tool to get started.").color(MUTED));
        ui.add_space(20.0);

        ui.horizontal_wrapped(|ui| {
            for tool in TOOLS {
                let response = card(ui, SURFACE, BORDER, |ui| {
                    ui.label(egui::RichText::new(tool.icon).monospace().size(16.0));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(tool.name).strong().color(egui::Color32::WHITE));
                    ui.label(egui::RichText::new(tool.summary).small().color(MUTED));
                });
                let response = response.interact(egui::Sense::click());
                if response.clicked() {
                    self.nav.navigate(tool.id);
                }
                response.on_hover_cursor(egui::CursorIcon::PointingHand);
            }

            for (name, blurb) in COMING_SOON {
                card(ui, egui::Color32::TRANSPARENT, BORDER, |ui| {
                    ui.add_space(24.0);
                    ui.label(egui::RichText::new(*name).strong().color(MUTED));
                    ui.label(egui::RichText::new(*blurb).small().weak());
                });
            }
        });

        ui.add_space(32.0);
        ui.separator();
        ui.add_space(8.0);
        ui.label(egui::RichText::new("STATUS").small().strong().color(MUTED));
        ui.horizontal(|ui| {
            ui.colored_label(OK_GREEN, "●");
            ui.label(egui::RichText::new("System Online").monospace().small());
        });
    }
}

fn card(
    ui: &mut egui::Ui,
    fill: egui::Color32,
    stroke: egui::Color32,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> egui::Response {
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .rounding(8.0)
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_min_size(CARD_SIZE);
            ui.set_max_width(CARD_SIZE.x);
            ui.vertical(add_contents);
        })
        .response
}
