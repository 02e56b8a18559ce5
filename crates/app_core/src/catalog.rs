//! Catalog of image paths for the active directory

use std::path::{Path, PathBuf};

/// Ordered list of image paths found by the last scan.
///
/// Always replaced wholesale, never patched entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<PathBuf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Swap in a fresh scan result. Returns whether the contents changed.
    pub fn replace(&mut self, entries: Vec<PathBuf>) -> bool {
        let changed = self.entries != entries;
        self.entries = entries;
        changed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|p| p == path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.entries
    }
}

/// An item resolved for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Path handed to the display surface
    pub path: PathBuf,
    /// Base name, shown as the title
    pub label: String,
    /// Normalized position within the catalog
    pub index: usize,
    /// Catalog length at resolution time
    pub total: usize,
}

impl DisplayItem {
    pub(crate) fn new(path: &Path, index: usize, total: usize) -> Self {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            label,
            index,
            total,
        }
    }

    /// "3 / 12"-style position text
    pub fn position(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_reports_change() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.replace(vec![PathBuf::from("/a.png")]));
        assert!(!catalog.replace(vec![PathBuf::from("/a.png")]));
        assert!(catalog.replace(Vec::new()));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_display_item_label() {
        let item = DisplayItem::new(Path::new("/pics/holiday.JPG"), 2, 5);
        assert_eq!(item.label, "holiday.JPG");
        assert_eq!(item.position(), "3 / 5");
    }
}
