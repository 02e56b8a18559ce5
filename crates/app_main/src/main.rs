//! RandomImageViewer - browse one folder of images in random or sequential order
//!
//! Main entry point.

mod app;

use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    let _log_guard = app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("RandomImageViewer starting...");

    // Load configuration
    let config = app_core::AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Config unreadable, using defaults: {}", e);
        app_core::AppConfig::default()
    });

    // Run the application
    app::run(config)
}
