//! Sidebar rendering for `ToolboxApp`.

use eframe::egui;
use zen_toolbox::shell::{ToolId, TOOLS};

use super::ToolboxApp;
use crate::ui::{nav_item, section_label};

impl ToolboxApp {
    pub fn draw_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("ZEN TOOLBOX").strong().color(egui::Color32::WHITE));
        });
        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        if nav_item(ui, self.nav.is_active(ToolId::Dashboard), "⌂", "Dashboard", None).clicked() {
            self.nav.navigate(ToolId::Dashboard);
        }

        ui.add_space(16.0);
        section_label(ui, "UTILITIES");

        for tool in TOOLS {
            let hint = Some(tool.description);
            if nav_item(ui, self.nav.is_active(tool.id), tool.icon, tool.name, hint).clicked() {
                self.nav.navigate(tool.id);
            }
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                ui.weak("User");
            });
            ui.separator();
        });
    }
}
