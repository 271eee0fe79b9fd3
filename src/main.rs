// TimeBlocks Planner Application
// Main entry point

use timeblocks::ui::PlannerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting TimeBlocks planner");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([960.0, 640.0])
            .with_title("TimeBlocks"),
        ..Default::default()
    };

    eframe::run_native(
        "TimeBlocks",
        options,
        Box::new(|cc| Ok(Box::new(PlannerApp::new(cc)))),
    )
}
