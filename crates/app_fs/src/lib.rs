//! RandomImageViewer File System Layer
//!
//! Provides the filesystem side of the image browser:
//! - Catalog scanning: non-recursive listing of recognized image files
//! - Quarantine: moving a file into a holding directory instead of deleting it

mod scanner;
mod quarantine;

pub use scanner::{is_image_path, list_images, scan_images, IMAGE_EXTENSIONS};
pub use quarantine::{ensure_dir, move_into};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

impl FsError {
    /// Classify an I/O error raised while operating on `path`
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => FsError::AccessDenied(path.to_path_buf()),
            ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
