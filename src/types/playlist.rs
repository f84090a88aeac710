use std::path::{Path, PathBuf};

/// Row range touched by a playlist mutation, so the view can update
/// incrementally instead of redrawing the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistChange {
    Inserted { row: usize },
    Removed { row: usize },
    Cleared,
}

/// Ordered list of media locations. Identity is the zero-based row;
/// duplicates are allowed. Not persisted across runs.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<PathBuf>,
}

impl Playlist {
    pub fn new() -> Self {
        Playlist {
            entries: Vec::new(),
        }
    }

    /// Appends a location and returns the change describing the new row.
    pub fn add(&mut self, location: PathBuf) -> PlaylistChange {
        self.entries.push(location);
        PlaylistChange::Inserted {
            row: self.entries.len() - 1,
        }
    }

    /// Removes the entry at `row`, shifting later rows down by one.
    /// Out-of-range rows are a no-op.
    pub fn remove_at(&mut self, row: usize) -> Option<PlaylistChange> {
        if row >= self.entries.len() {
            return None;
        }
        self.entries.remove(row);
        Some(PlaylistChange::Removed { row })
    }

    pub fn clear(&mut self) -> PlaylistChange {
        self.entries.clear();
        PlaylistChange::Cleared
    }

    pub fn get(&self, row: usize) -> Option<&Path> {
        self.entries.get(row).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for a row: the file name, falling back to the full
    /// location when there is none.
    pub fn display_name(&self, row: usize) -> Option<String> {
        self.get(row).map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.to_string_lossy().into_owned())
        })
    }
}
