//! Application error types

use app_fs::FsError;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("No image is selected")]
    EmptyCatalog,

    #[error("Random source unavailable: {0}")]
    Random(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Fs(_) | AppError::EmptyCatalog | AppError::Random(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Fs(FsError::NotFound(path)) => {
                format!("Not found: {}", path.display())
            }
            AppError::Fs(FsError::AccessDenied(path)) => {
                format!("Access denied: {}", path.display())
            }
            AppError::Fs(FsError::AlreadyExists(path)) => {
                format!("Already in quarantine: {}", path.display())
            }
            AppError::Fs(FsError::InvalidPath(msg)) => msg.clone(),
            AppError::EmptyCatalog => "There is no image to act on".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<rand::Error> for AppError {
    fn from(e: rand::Error) -> Self {
        AppError::Random(e.to_string())
    }
}
