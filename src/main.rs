//! Growth Dashboard - Tabular Data Cleaning, Regression & Chart Viewer
//!
//! Upload a CSV or Excel file, remove duplicate rows, fit a one-feature
//! linear regression and chart the result.

mod charts;
mod config;
mod data;
mod error;
mod gui;
mod session;
mod stats;

use anyhow::anyhow;
use clap::Parser;
use config::AppConfig;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "growth-dashboard", version, about)]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    log::info!("Starting with {:?}", config);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Growth Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Growth Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("GUI error: {}", e))
}
