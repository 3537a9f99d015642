//! Directory scanner: mirrors a directory tree as a [`FileSystem`] composite.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use crate::domain::{ComponentArena, ComponentId, FileSystem, DEFAULT_MAX_DEPTH};
use crate::infrastructure::{InfraError, InfraResult};

/// Builds a file-system composite from a directory on disk.
///
/// Symlinks are not followed and neither they nor other special files become
/// components. Entries are visited in file-name order so the resulting child
/// order is deterministic.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    max_depth: usize,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl DirectoryScanner {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn scan(&self, directory_path: &Path) -> InfraResult<FileSystem> {
        if !directory_path.exists() {
            return Err(InfraError::Scan {
                path: directory_path.to_path_buf(),
                message: "not found".to_string(),
            });
        }
        if !directory_path.is_dir() {
            return Err(InfraError::Scan {
                path: directory_path.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut fs = FileSystem::with_arena(
            ComponentArena::with_max_depth(self.max_depth),
            display_name(directory_path),
        );
        let mut folders: HashMap<PathBuf, ComponentId> = HashMap::new();
        folders.insert(directory_path.to_path_buf(), fs.root());

        let walker = WalkDir::new(directory_path)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(directory_path, e))?;
            let path = entry.path();
            let Some(&parent) = path.parent().and_then(|p| folders.get(p)) else {
                // parent was skipped
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                let folder = fs.add_folder(parent, name)?;
                folders.insert(path.to_path_buf(), folder);
            } else if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| walk_error(path, e))?;
                trace!("file {} ({} bytes)", path.display(), metadata.len());
                fs.add_file(parent, name, metadata.len())?;
            } else {
                debug!("skipping special file: {}", path.display());
            }
        }

        debug!(
            "scanned {}: {} components",
            directory_path.display(),
            fs.arena().len()
        );
        Ok(fs)
    }
}

fn walk_error(fallback: &Path, e: walkdir::Error) -> InfraError {
    let path = e.path().unwrap_or(fallback).to_path_buf();
    let message = e.to_string();
    match e.into_io_error() {
        Some(source) => InfraError::io(format!("scan {}", path.display()), source),
        None => InfraError::Scan { path, message },
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
