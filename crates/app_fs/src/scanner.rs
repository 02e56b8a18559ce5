//! Catalog scanner - non-recursive listing of image files in one directory

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Recognized image extensions (lowercase)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "tiff", "bmp", "svg"];

/// Check if a path carries a recognized image extension (case-insensitive)
pub fn is_image_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List the image files immediately inside `dir`, in natural name order.
///
/// Directories are never returned, even if their name ends in an image
/// extension. Entries that vanish or cannot be stat'ed between listing and
/// inspection are skipped.
pub fn list_images<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    let metadata = fs::metadata(dir).map_err(|e| FsError::from_io(e, dir))?;
    if !metadata.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", dir.display())));
    }

    let mut images = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| FsError::from_io(e, dir))? {
        let entry = entry.map_err(|e| FsError::from_io(e, dir))?;
        let path = entry.path();

        if !is_image_path(&path) {
            continue;
        }

        // Follows symlinks, so a link to an image file counts as an image
        match fs::metadata(&path) {
            Ok(m) if m.is_file() => images.push(path),
            Ok(_) => continue,
            Err(_) => continue, // Skip entries we can't read
        }
    }

    images.sort_by_cached_key(|p| {
        natural_sort_key(&p.file_name().map(|n| n.to_string_lossy()).unwrap_or_default())
    });

    Ok(images)
}

/// Generate a natural sort key (handles numbers correctly)
/// "image2.jpg" < "image10.jpg"
fn natural_sort_key(s: &str) -> Vec<NaturalSortPart> {
    let mut parts = Vec::new();
    let mut current_num = String::new();
    let mut current_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if !current_str.is_empty() {
                parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
                current_str.clear();
            }
            current_num.push(c);
        } else {
            if !current_num.is_empty() {
                parts.push(NaturalSortPart::num(&current_num));
                current_num.clear();
            }
            current_str.push(c);
        }
    }

    if !current_num.is_empty() {
        parts.push(NaturalSortPart::num(&current_num));
    }
    if !current_str.is_empty() {
        parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
    }

    parts
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalSortPart {
    Num(u64),
    Str(String),
}

impl NaturalSortPart {
    /// Digit runs too long for u64 fall back to text comparison
    fn num(digits: &str) -> Self {
        digits
            .parse::<u64>()
            .map(NaturalSortPart::Num)
            .unwrap_or_else(|_| NaturalSortPart::Str(digits.to_string()))
    }
}

/// Scan `dir` for images, treating any failure as an empty directory.
///
/// Used by refreshes, which may race with the directory being moved or
/// deleted externally; the next refresh picks up whatever is there then.
pub fn scan_images<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let dir = dir.as_ref();

    match list_images(dir) {
        Ok(images) => images,
        Err(FsError::NotFound(_)) => {
            tracing::debug!("Scan target missing: {}", dir.display());
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Scan of {} failed: {}", dir.display(), e);
            Vec::new()
        }
    }
}
