mod app;
mod color;
mod config;
mod data;
mod export;
mod session;
mod state;
mod ui;

use app::HysteresisApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = config::Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 680.0])
            .with_min_inner_size([520.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hysteresis Loop – OOMMF converter",
        options,
        Box::new(|_cc| Ok(Box::new(HysteresisApp::new(settings)))),
    )
}
