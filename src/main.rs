mod app;
mod cli;
mod config;
mod content;
mod error;
mod input;
mod io;
mod state;
mod style;
mod view;

use app::GuideApp;
use clap::Parser;
use cli::Args;
use config::Config;
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config_path = args.config_path();

    if args.write_default_config {
        let Some(path) = config_path else {
            error!("{}", error::ConfigError::NoConfigDir);
            std::process::exit(1);
        };
        match Config::create_default(&path) {
            Ok(true) => info!("Wrote default config to {}", path.display()),
            Ok(false) => info!("Config already exists at {}", path.display()),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let mut config = match &config_path {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    args.apply(&mut config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("App Guide & Manual"),
        ..Default::default()
    };

    eframe::run_native(
        "App Guide & Manual",
        options,
        Box::new(move |cc| Ok(Box::new(GuideApp::new(cc, config, config_path)))),
    )
}
