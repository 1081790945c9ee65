//! Finds wallpapers in a directory tree.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions recognised as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "svg"];

/// Default upper bound of collected files.
pub const DEFAULT_MAX_FILES: usize = 10_000;

/// Whether the file name ends with one of [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_image(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Walks `root` depth-first and returns at most `max` image files.
///
/// Entries whose name starts with `.` are skipped, and so is everything below them.
/// Directories that cannot be read are skipped silently, which includes `root` itself: a missing
/// root yields an empty list rather than an error. Symlinks are followed, links that lead back to
/// one of their ancestors are dropped.
///
/// The order follows the order the filesystem hands out directory entries. When the cap is hit,
/// which files made it in is not specified beyond that.
#[must_use]
pub fn collect(root: &Path, max: usize) -> Vec<PathBuf> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| {
            entry
                .inspect_err(|err| log::debug!("skipping: {err}"))
                .ok()
        })
        .filter(|entry| {
            entry.file_type().is_file() && is_image(&entry.file_name().to_string_lossy())
        })
        .take(max)
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::os::unix::fs::symlink;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }

    #[test]
    fn recognises_extensions() {
        assert!(is_image("a.jpg"));
        assert!(is_image("a.JPEG"));
        assert!(is_image("some.thing.WebP"));
        assert!(is_image("vector.svg"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("jpg"));
        assert!(!is_image("archive.png.gz"));
        assert!(!is_image("trailing."));
    }

    #[test]
    fn walks_recursively_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("one.png"));
        touch(&root.join("readme.md"));
        touch(&root.join("nested/two.JPG"));
        touch(&root.join("nested/deeper/three.tiff"));
        touch(&root.join(".hidden/four.png"));
        touch(&root.join("nested/.five.png"));
        fs::create_dir(root.join("folder.png")).unwrap();

        let mut found = collect(root, DEFAULT_MAX_FILES);
        found.sort();
        let mut expected = vec![
            root.join("nested/deeper/three.tiff"),
            root.join("nested/two.JPG"),
            root.join("one.png"),
        ];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn respects_the_cap() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            touch(&dir.path().join(format!("top{i}.png")));
            touch(&dir.path().join(format!("sub/inner{i}.gif")));
        }
        assert_eq!(collect(dir.path(), 3).len(), 3);
        assert_eq!(collect(dir.path(), 7).len(), 7);
        assert_eq!(collect(dir.path(), 100).len(), 10);
        assert!(collect(dir.path(), 0).is_empty());
    }

    #[test]
    fn empty_or_missing_roots() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect(dir.path(), DEFAULT_MAX_FILES).is_empty());
        assert!(collect(&dir.path().join("nope"), DEFAULT_MAX_FILES).is_empty());
    }

    #[test]
    fn symlink_cycles_are_walked_once() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("only.png"));
        touch(&dir.path().join("sub/other.jpg"));
        symlink(".", dir.path().join("loop")).unwrap();
        symlink("..", dir.path().join("sub/up")).unwrap();

        let mut found = collect(dir.path(), DEFAULT_MAX_FILES);
        found.sort();
        assert_eq!(
            found,
            vec![dir.path().join("only.png"), dir.path().join("sub/other.jpg")]
        );
    }

    #[test]
    fn linked_images_and_directories_count() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        touch(&outside.path().join("far/away.gif"));
        symlink(outside.path().join("far"), dir.path().join("far")).unwrap();
        symlink(
            outside.path().join("far/away.gif"),
            dir.path().join("near.gif"),
        )
        .unwrap();

        let mut found = collect(dir.path(), DEFAULT_MAX_FILES);
        found.sort();
        assert_eq!(
            found,
            vec![dir.path().join("far/away.gif"), dir.path().join("near.gif")]
        );
    }

    #[test]
    fn paths_are_absolute() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.bmp"));
        let found = collect(dir.path(), DEFAULT_MAX_FILES);
        assert!(found.iter().all(|path| path.is_absolute()));
    }
}
