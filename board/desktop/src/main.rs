mod app;
mod format;
mod synthetic;

use app::ToolkitApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([480.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sensors Toolkit",
        options,
        Box::new(|cc| Ok(Box::new(ToolkitApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))?;
    Ok(())
}
