//! FeatureView desktop viewer.
//!
//! This binary provides the user-facing viewer:
//! - Keyword search against the museum object API
//! - Preview list of results, click to feature a record
//! - Feature panel with click-to-search culture, technique, medium and people
//!
//! Usage: `feature-viewer [featured.json]`. The optional file holds one object
//! API record to show on startup.

use std::path::PathBuf;

use anyhow::Context;
use eframe::egui;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feature_view::api::MuseumClient;
use feature_view::config::{self, LogConfig, ViewerConfig};
use feature_view::ui::app::load_featured;
use feature_view::ui::ViewerApp;

/// Initialize tracing, to stderr or to a daily rolling file.
///
/// The returned guard must live until exit to flush file logs.
fn init_logging(log: &LogConfig) -> Option<WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter))
    };

    if log.to_file {
        if let Some(log_dir) = config::log_dir() {
            match std::fs::create_dir_all(&log_dir) {
                Ok(()) => {
                    let file_appender = tracing_appender::rolling::daily(&log_dir, "feature-viewer.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    tracing_subscriber::registry()
                        .with(filter())
                        .with(
                            tracing_subscriber::fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();

                    info!("Logging initialized to {:?}", log_dir);
                    return Some(guard);
                }
                Err(e) => {
                    eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
                }
            }
        }
    }

    tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    None
}

/// Main entry point for the viewer.
fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.log);

    info!("FeatureView v{} starting", env!("CARGO_PKG_VERSION"));

    let featured = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match load_featured(&path) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Failed to load featured item from {:?}: {}", path, e);
                None
            }
        },
        None => None,
    };

    let client = MuseumClient::new(&config.api).context("Failed to create API client")?;

    // Create tokio runtime for async searches
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FeatureView",
        options,
        Box::new(move |cc| {
            // Photos are loaded straight from their URLs
            egui_extras::install_image_loaders(&cc.egui_ctx);

            Ok(Box::new(ViewerApp::new(
                cc,
                handle,
                client,
                featured,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Viewer failed: {}", e))
}
