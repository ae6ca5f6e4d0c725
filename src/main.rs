use eframe::egui;

use zen_toolbox::config::ToolboxConfig;

mod app;
mod ui;

use app::ToolboxApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = ToolboxConfig::load();
    log::debug!("configuration: {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Zen Toolbox")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_decorations(false),
        ..Default::default()
    };

    eframe::run_native(
        "Zen Toolbox",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ToolboxApp::new(&config)?))
        }),
    )
}
