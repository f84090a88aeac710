use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions accepted by folder import and offered by the file
/// dialog filter, matched case-insensitively.
pub const MEDIA_EXTENSIONS: [&str; 12] = [
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "mp3", "wav", "flac", "aac", "m4a", "ogg",
];

pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            MEDIA_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

/// Walks `folder` recursively and collects media files in traversal
/// order. Unreadable entries are skipped.
pub fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_media_file(path))
        .collect()
}

/// Filtered single-file picker: media extensions plus an "All files"
/// escape hatch.
pub fn pick_media_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Media File")
        .add_filter("Media Files", &MEDIA_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}

pub fn pick_folder() -> Option<PathBuf> {
    rfd::FileDialog::new().set_title("Open Folder").pick_folder()
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_media_file(Path::new("/m/a.mp4")));
        assert!(is_media_file(Path::new("/m/c.MP3")));
        assert!(is_media_file(Path::new("/m/d.Mkv")));
        assert!(!is_media_file(Path::new("/m/b.txt")));
        assert!(!is_media_file(Path::new("/m/noext")));
    }

    #[test]
    fn scan_keeps_only_media_in_traversal_order() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();
        File::create(dir.path().join("c.MP3")).unwrap();

        let found = scan_folder(dir.path());
        let mut names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.mp4", "c.MP3"]);
    }

    #[test]
    fn scan_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("season1");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("episode.mkv")).unwrap();
        File::create(dir.path().join("notes.md")).unwrap();

        let found = scan_folder(dir.path());
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("season1/episode.mkv"));
    }
}
