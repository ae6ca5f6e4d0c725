//! Title bar rendering for `ToolboxApp`.
//!
//! The native window has no decorations, so this strip doubles as the drag
//! handle and hosts the minimize / maximize / close buttons.

use eframe::egui;
use zen_toolbox::shell::window::WindowControls;
use zen_toolbox::shell::ToolId;

use super::ToolboxApp;
use crate::ui::MUTED;

/// Window commands issued through egui viewport commands.
pub struct EguiWindow<'a> {
    ctx: &'a egui::Context,
    maximized: bool,
}

impl<'a> EguiWindow<'a> {
    pub fn new(ctx: &'a egui::Context, maximized: bool) -> Self {
        Self { ctx, maximized }
    }
}

impl WindowControls for EguiWindow<'_> {
    fn minimize(&self) {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
    }

    fn toggle_maximize(&self) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Maximized(!self.maximized));
    }

    fn close(&self) {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl ToolboxApp {
    pub fn draw_title_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let window = EguiWindow::new(ctx, self.is_maximized);

        // Background drag area; widgets added afterwards sit on top of it.
        let drag = ui.interact(
            ui.max_rect(),
            egui::Id::new("title_bar_drag"),
            egui::Sense::click_and_drag(),
        );
        if drag.double_clicked() {
            window.toggle_maximize();
        } else if drag.drag_started_by(egui::PointerButton::Primary) {
            ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }

        ui.horizontal_centered(|ui| {
            ui.add_space(16.0);
            let home = ui.add(
                egui::Label::new(egui::RichText::new("Home").color(MUTED))
                    .sense(egui::Sense::click()),
            );
            if home.clicked() {
                self.nav.navigate(ToolId::Dashboard);
            }
            home.on_hover_cursor(egui::CursorIcon::PointingHand);

            ui.label(egui::RichText::new("/").color(egui::Color32::from_gray(63)));
            ui.label(
                egui::RichText::new(self.nav.breadcrumb())
                    .strong()
                    .color(egui::Color32::WHITE),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                if ui.add(chrome_button("🗙")).on_hover_text("Close").clicked() {
                    window.close();
                }
                let (icon, tip) = if self.is_maximized {
                    ("🗗", "Restore")
                } else {
                    ("🗖", "Maximize")
                };
                if ui.add(chrome_button(icon)).on_hover_text(tip).clicked() {
                    window.toggle_maximize();
                }
                if ui.add(chrome_button("🗕")).on_hover_text("Minimize").clicked() {
                    window.minimize();
                }
            });
        });
    }
}

fn chrome_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(text)
        .frame(false)
        .min_size(egui::vec2(32.0, 28.0))
}
