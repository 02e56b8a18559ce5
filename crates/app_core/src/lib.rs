//! RandomImageViewer Core Domain Logic
//!
//! This crate contains:
//! - The browsing engine (catalog, navigation, active directory under one lock)
//! - Background catalog refresh
//! - Command system
//! - Configuration
//! - Error types

pub mod catalog;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod refresh;

pub use catalog::{Catalog, DisplayItem};
pub use command::{
    Bindings, Command, CommandDispatcher, CommandId, CommandOutcome, CommandParams, InputEvent,
};
pub use config::{AppConfig, BrowserConfig};
pub use engine::{Engine, RefreshOutcome, ViewSnapshot};
pub use error::AppError;
pub use navigation::{normalize_index, Direction, History, NavigationState, HISTORY_CAPACITY};
pub use refresh::{RefreshEvent, RefreshLoop, REFRESH_INTERVAL};
