use std::time::Duration;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use horae_clock::app::ClockApp;
use horae_clock::fonts;
use horae_clock::style::FaceStyle;
use horae_engine::device::GpuInit;
use horae_engine::logging::{init_logging, LoggingConfig};
use horae_engine::text::FontSystem;
use horae_engine::time::TickSchedule;
use horae_engine::window::{Runtime, RuntimeConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let font = fonts::discover()?;

    let mut font_system = FontSystem::new();
    let font_id = font_system
        .load_font(&font.bytes)
        .with_context(|| format!("failed to parse {}", font.path.display()))?;
    log::info!(
        "font: {} ({})",
        font_system.name(font_id).unwrap_or("unnamed"),
        font.path.display()
    );

    let config = RuntimeConfig {
        title: "Clock".to_string(),
        initial_size: LogicalSize::new(400.0, 400.0),
        tick: TickSchedule::WallClock(Duration::from_secs(1)),
    };

    let app = ClockApp::new(font_system, FaceStyle::new(font_id));
    Runtime::run(config, GpuInit::default(), app)
}
