//! Browsing engine: catalog, navigation and active directory behind one lock

use crate::{AppError, BrowserConfig, Catalog, Direction, DisplayItem, NavigationState};
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::{Path, PathBuf};

/// Everything guarded by the engine lock.
///
/// Any operation touching more than one field holds the lock throughout.
struct BrowserState {
    directory: PathBuf,
    catalog: Catalog,
    navigation: NavigationState,
}

impl BrowserState {
    fn current_item(&self) -> Option<DisplayItem> {
        let total = self.catalog.len();
        let index = self.navigation.display_index(total)?;
        self.catalog
            .get(index)
            .map(|path| DisplayItem::new(path, index, total))
    }
}

/// Result of a catalog refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub len: usize,
    pub changed: bool,
}

/// Everything a display layer needs, read under one lock acquisition
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub item: Option<DisplayItem>,
    pub history_len: usize,
    pub directory: PathBuf,
}

impl ViewSnapshot {
    /// Navigation controls only make sense with something to show
    pub fn controls_enabled(&self) -> bool {
        self.item.is_some()
    }

    /// Label for the back button, "Previous(3)" style
    pub fn back_label(&self) -> String {
        if self.history_len == 0 {
            "Previous".to_string()
        } else {
            format!("Previous({})", self.history_len)
        }
    }
}

/// The browsing engine.
///
/// Shared between the foreground thread and the refresh loop via `Arc`.
pub struct Engine {
    state: Mutex<BrowserState>,
    quarantine_dir: PathBuf,
}

impl Engine {
    /// Open `directory` and scan it.
    ///
    /// An unreadable or missing directory yields an empty catalog; the
    /// refresh loop picks it up once it appears.
    pub fn new(directory: impl Into<PathBuf>, quarantine_dir: impl Into<PathBuf>) -> Self {
        let directory = absolute(directory.into());
        let catalog = Catalog::from_paths(app_fs::scan_images(&directory));

        tracing::info!(
            "Browsing {} ({} images)",
            directory.display(),
            catalog.len()
        );

        Self {
            state: Mutex::new(BrowserState {
                directory,
                catalog,
                navigation: NavigationState::new(),
            }),
            quarantine_dir: quarantine_dir.into(),
        }
    }

    /// Build an engine from configuration, landing on a random image if asked
    pub fn from_config(config: &BrowserConfig) -> Self {
        let engine = Self::new(config.start_directory(), config.quarantine_dir.clone());

        if config.random_on_start && engine.catalog_len() > 0 {
            if let Err(e) = engine.jump_random(false) {
                tracing::warn!("Starting at first image: {}", e);
            }
        }

        engine
    }

    /// Step one item left or right, recording the current position
    pub fn step(&self, direction: Direction) {
        let mut state = self.state.lock();
        state.navigation.step(direction);
        tracing::trace!("Step {:?} -> {}", direction, state.navigation.index());
    }

    /// Jump to a random position.
    ///
    /// The raw value spans the whole `i64` range and is drawn from the OS
    /// random source; it is normalized only when displayed.
    pub fn jump_random(&self, record_history: bool) -> Result<(), AppError> {
        let raw = random_index()?;

        let mut state = self.state.lock();
        state.navigation.jump_to(raw, record_history);
        Ok(())
    }

    /// Return to the most recently recorded position.
    ///
    /// Returns `false` (and changes nothing) when history is empty.
    pub fn go_back(&self) -> bool {
        self.state.lock().navigation.go_back()
    }

    /// Switch to another directory.
    ///
    /// The new directory is scanned before anything changes, so a failure
    /// leaves the previous directory, catalog and history in place.
    pub fn change_directory(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let directory = absolute(path.as_ref().to_path_buf());

        let mut state = self.state.lock();

        let images = app_fs::list_images(&directory).map_err(|e| {
            tracing::warn!("Cannot open {}: {}", directory.display(), e);
            e
        })?;

        state.directory = directory;
        state.catalog.replace(images);
        state.navigation.reset();

        let len = state.catalog.len();
        tracing::info!("Browsing {} ({} images)", state.directory.display(), len);
        Ok(len)
    }

    /// Rescan the active directory now.
    ///
    /// Scan failures count as an empty directory. Navigation is untouched;
    /// a now out-of-range index is renormalized on the next display.
    pub fn refresh(&self) -> RefreshOutcome {
        let mut state = self.state.lock();
        let images = app_fs::scan_images(&state.directory);
        let changed = state.catalog.replace(images);
        let len = state.catalog.len();

        if changed {
            tracing::debug!("Catalog refreshed: {} images", len);
        }

        RefreshOutcome { len, changed }
    }

    /// Resolve the item at the current position, if any
    pub fn current_item(&self) -> Option<DisplayItem> {
        self.state.lock().current_item()
    }

    /// Move the current image into the quarantine directory.
    ///
    /// On success the catalog is rescanned immediately and the destination
    /// path is returned. On failure nothing changes and the error is returned.
    pub fn quarantine_current(&self) -> Result<PathBuf, AppError> {
        let mut state = self.state.lock();

        let item = state.current_item().ok_or(AppError::EmptyCatalog)?;

        app_fs::ensure_dir(&self.quarantine_dir)?;
        let target = app_fs::move_into(&item.path, &self.quarantine_dir).map_err(|e| {
            tracing::warn!("Quarantine of {} failed: {}", item.path.display(), e);
            e
        })?;

        let images = app_fs::scan_images(&state.directory);
        state.catalog.replace(images);

        tracing::info!(
            "Quarantined {} ({} images left)",
            item.label,
            state.catalog.len()
        );
        Ok(target)
    }

    /// Read everything a display needs in one go
    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.lock();
        ViewSnapshot {
            item: state.current_item(),
            history_len: state.navigation.history().len(),
            directory: state.directory.clone(),
        }
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().navigation.history().len()
    }

    pub fn catalog_len(&self) -> usize {
        self.state.lock().catalog.len()
    }

    /// Copy of the current catalog paths
    pub fn catalog(&self) -> Vec<PathBuf> {
        self.state.lock().catalog.paths().to_vec()
    }

    pub fn directory(&self) -> PathBuf {
        self.state.lock().directory.clone()
    }

    /// Logical (unnormalized) navigation index
    pub fn logical_index(&self) -> i64 {
        self.state.lock().navigation.index()
    }

    pub fn quarantine_dir(&self) -> &Path {
        &self.quarantine_dir
    }
}

/// Draw a full-range index from the OS random source
fn random_index() -> Result<i64, AppError> {
    let mut bytes = [0u8; 8];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(i64::from_le_bytes(bytes))
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}
