//! Structured logging setup with tracing

use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = super::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "viewer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(debug_assertions)]
    {
        // Development: pretty console output + file
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // Release: JSON file only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    }

    tracing::info!("Logging initialized in {}", log_dir.display());
    Ok(guard)
}

/// Clean up log files older than specified days
pub fn cleanup_old_logs(days: u32) -> anyhow::Result<usize> {
    cleanup_logs_in(&super::log_dir(), days)
}

/// Delete `.log` files in `log_dir` not modified within `days`
pub fn cleanup_logs_in(log_dir: &Path, days: u32) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let threshold = SystemTime::now() - Duration::from_secs(days as u64 * 24 * 60 * 60);
    let mut deleted = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if !is_log_file(&path) {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified());
        if matches!(modified, Ok(t) if t < threshold) && std::fs::remove_file(&path).is_ok() {
            deleted += 1;
            tracing::debug!("Deleted old log: {:?}", path);
        }
    }

    tracing::info!("Cleaned up {} old log files", deleted);
    Ok(deleted)
}

/// Rolling appender names files `viewer.log.YYYY-MM-DD`
fn is_log_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| {
            let name = n.to_string_lossy();
            name.ends_with(".log") || name.contains(".log.")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_log_file() {
        assert!(is_log_file(Path::new("viewer.log")));
        assert!(is_log_file(Path::new("logs/viewer.log.2026-10-15")));
        assert!(!is_log_file(Path::new("notes.txt")));
    }

    #[test]
    fn test_cleanup_keeps_fresh_logs() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("viewer.log"), b"fresh").unwrap();
        std::fs::write(temp.path().join("keep.txt"), b"other").unwrap();

        assert_eq!(cleanup_logs_in(temp.path(), 7).unwrap(), 0);
        assert!(temp.path().join("viewer.log").exists());
    }

    #[test]
    fn test_cleanup_with_zero_days_removes_logs_only() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("viewer.log.2026-10-01"), b"old").unwrap();
        std::fs::write(temp.path().join("keep.txt"), b"other").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cleanup_logs_in(temp.path(), 0).unwrap(), 1);
        assert!(temp.path().join("keep.txt").exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert_eq!(cleanup_logs_in(&temp.path().join("none"), 7).unwrap(), 0);
    }
}
