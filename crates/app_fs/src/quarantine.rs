//! Quarantine moves - relocate a file into a holding directory

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `dir` (and parents) if it does not exist yet
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    if dir.exists() {
        return Err(FsError::InvalidPath(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    fs::create_dir_all(dir).map_err(|e| FsError::from_io(e, dir))?;
    tracing::info!("Created directory: {}", dir.display());
    Ok(())
}

/// Move `source` into `target_dir`, keeping its base name.
///
/// Never overwrites: an existing file of the same name in `target_dir` is
/// reported as [`FsError::AlreadyExists`] and `source` is left in place.
/// Returns the destination path.
pub fn move_into(source: &Path, target_dir: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(FsError::NotFound(source.to_path_buf()));
    }

    if !target_dir.is_dir() {
        return Err(FsError::NotFound(target_dir.to_path_buf()));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| FsError::InvalidPath(format!("No file name: {}", source.display())))?;
    let target = target_dir.join(file_name);

    if target.exists() {
        return Err(FsError::AlreadyExists(target));
    }

    // Try rename first (fast, same filesystem)
    match fs::rename(source, &target) {
        Ok(()) => {
            tracing::info!("Moved: {} -> {}", source.display(), target.display());
        }
        Err(e) if is_cross_device(&e) => {
            tracing::info!(
                "Cross-filesystem move, using copy+delete: {} -> {}",
                source.display(),
                target.display()
            );
            fs::copy(source, &target).map_err(|e| FsError::from_io(e, source))?;
            if let Err(e) = fs::remove_file(source) {
                // Keep exactly one copy around
                let _ = fs::remove_file(&target);
                return Err(FsError::from_io(e, source));
            }
        }
        Err(e) => return Err(FsError::from_io(e, source)),
    }

    Ok(target)
}

/// Unix: EXDEV = 18, Windows: ERROR_NOT_SAME_DEVICE = 17
fn is_cross_device(e: &std::io::Error) -> bool {
    match e.raw_os_error() {
        Some(18) => cfg!(unix),
        Some(17) => cfg!(windows),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_once() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("trash").join("inner");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());

        // Second call is a no-op
        ensure_dir(&dir).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("trash");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(ensure_dir(&file), Err(FsError::InvalidPath(_))));
    }

    #[test]
    fn test_move_into_keeps_base_name() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("cat.png");
        let trash = temp.path().join("trash");
        fs::write(&source, b"meow").unwrap();
        fs::create_dir(&trash).unwrap();

        let moved = move_into(&source, &trash).unwrap();

        assert_eq!(moved, trash.join("cat.png"));
        assert!(!source.exists());
        assert_eq!(fs::read(&moved).unwrap(), b"meow");
    }

    #[test]
    fn test_move_into_refuses_collision() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("dup.jpg");
        let trash = temp.path().join("trash");
        fs::create_dir(&trash).unwrap();
        fs::write(&source, b"new").unwrap();
        fs::write(trash.join("dup.jpg"), b"old").unwrap();

        let err = move_into(&source, &trash).unwrap_err();

        assert!(matches!(err, FsError::AlreadyExists(_)));
        assert!(source.exists());
        assert_eq!(fs::read(trash.join("dup.jpg")).unwrap(), b"old");
    }

    #[test]
    fn test_move_into_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = move_into(&temp.path().join("ghost.png"), temp.path()).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }
}
