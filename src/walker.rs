use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Directory names never descended into: VCS metadata, installed
/// dependencies, build output, and tool caches.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "bower_components",
    "vendor",
    "target",
    "dist",
    "build",
    "out",
    "bin",
    "obj",
    "__pycache__",
    ".tox",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
    "coverage",
    ".cache",
];

/// One visited directory with the files it directly contains.
#[derive(Debug)]
pub struct DirectoryListing {
    pub path: PathBuf,
    /// Distance from the scan root; the root itself is depth 0.
    pub depth: usize,
    pub files: Vec<PathBuf>,
}

/// Bounded breadth-first directory traversal.
pub struct FileSystemWalker {
    extra_ignores: Vec<String>,
}

impl FileSystemWalker {
    pub fn new() -> Self {
        Self {
            extra_ignores: Vec::new(),
        }
    }

    /// Additional directory names to skip, on top of [`IGNORED_DIRS`].
    pub fn with_ignores(extra_ignores: Vec<String>) -> Self {
        Self { extra_ignores }
    }

    fn is_ignored(&self, name: &str) -> bool {
        IGNORED_DIRS.contains(&name) || self.extra_ignores.iter().any(|n| n == name)
    }

    /// List the files directly under one directory. Unreadable entries are
    /// skipped; detection treats them as soft conditions.
    pub fn list_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();
        files
    }

    /// Walk from `root` down to `max_depth` inclusive, breadth-first, so
    /// shallower directories are always listed before deeper ones and
    /// depth-derived confidence stays deterministic.
    pub fn scan(&self, root: &Path, max_depth: usize) -> Vec<DirectoryListing> {
        let mut listings = Vec::new();
        let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();
        queue.push_back((root.to_path_buf(), 0));

        while let Some((dir, depth)) = queue.pop_front() {
            listings.push(DirectoryListing {
                path: dir.clone(),
                depth,
                files: self.list_dir(&dir),
            });

            if depth >= max_depth {
                continue;
            }

            let mut subdirs: Vec<PathBuf> = Vec::new();
            if let Ok(entries) = std::fs::read_dir(&dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if !path.is_dir() {
                        continue;
                    }
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    if self.is_ignored(&name) {
                        continue;
                    }
                    subdirs.push(path);
                }
            }
            subdirs.sort();
            for sub in subdirs {
                queue.push_back((sub, depth + 1));
            }
        }

        listings
    }
}

impl Default for FileSystemWalker {
    fn default() -> Self {
        Self::new()
    }
}
