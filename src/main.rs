// src/main.rs
use std::path::PathBuf;
use anyhow::{anyhow, Context};
use capture_scope::config::ViewerConfig;
use capture_scope::dsp::{AnalysisSession, PlotStyle};
use capture_scope::export::export_session;
use capture_scope::gui::CaptureScopeApp;
use clap::Parser;
use eframe::egui;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "capture-scope", about = "Plot and inspect binary signal captures")]
struct Args {
    /// Viewer configuration (JSON)
    config: PathBuf,
    /// Write PNG plots into this directory instead of opening a window
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
    /// PNG width in pixels
    #[arg(long, default_value_t = 900)]
    width: u32,
    /// PNG height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,
}

// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ViewerConfig::load(&args.config)
        .with_context(|| format!("failed to read config {}", args.config.display()))?;
    let session = AnalysisSession::load(&config).context("failed to load captures")?;

    if let Some(dir) = args.export {
        let style = PlotStyle {
            width: args.width,
            height: args.height,
            ..PlotStyle::default()
        };
        let written = export_session(&session, &dir, &style)
            .with_context(|| format!("failed to export plots to {}", dir.display()))?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    info!("opening viewer with {} view(s)", session.view_count());
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 700.0])
        .with_min_inner_size([640.0, 400.0])
        .with_title("Capture Scope");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Capture Scope",
        options,
        Box::new(move |_cc| Box::new(CaptureScopeApp::new(session))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
