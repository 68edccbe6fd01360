mod admin;
mod app;
mod config;
mod demo;
mod drawing;
mod geo;
mod journey;
mod settings;
mod shipment;
mod store;
mod surface;
mod tracker;
mod viewer;
mod viewport;

use app::App;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1600.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "VoyageTrack",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}
