mod ops;
mod player;
mod types;
mod ui;

use eframe::egui;
use gstreamer as gst;
use log::LevelFilter;

use crate::player::GstEngine;
use crate::types::settings::StoredSettings;
use crate::ui::app::MedleyApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_module("medley", LevelFilter::Info)
        .init();

    gst::init().expect("Failed to initialize GStreamer");

    let stored = StoredSettings::load();

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Medley")
        .with_inner_size([1200.0, 800.0])
        .with_min_inner_size([640.0, 480.0]);
    if let Some(geometry) = stored.geometry {
        viewport = viewport
            .with_position([geometry.x, geometry.y])
            .with_inner_size([geometry.width, geometry.height]);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Medley",
        native_options,
        Box::new(move |_cc| {
            let engine = GstEngine::new().expect("Failed to create playback pipeline");
            Ok(Box::new(MedleyApp::new(engine, &stored)))
        }),
    )?;
    Ok(())
}
