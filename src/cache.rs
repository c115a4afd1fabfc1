//! Local cache of index spreadsheet snapshots
//!
//! The cache directory is expected to hold one snapshot at a time. When more
//! than one `.xlsx` file is present the most recently created one wins; this
//! depends on the filesystem clock and is best effort.

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::notice::NoticeError;

/// File extension of index snapshots
pub const SNAPSHOT_EXTENSION: &str = "xlsx";

/// A cached copy of the index spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub path: PathBuf,
    /// Creation time, or modification time where creation time is unavailable
    pub created: SystemTime,
}

/// Result of writing a snapshot into the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    AlreadyExists(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All snapshot files below the cache directory, searched recursively
    pub fn snapshots(&self) -> Result<Vec<CacheSnapshot>, NoticeError> {
        if !self.root.exists() {
            debug!("Cache directory {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut snapshots = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable cache entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_snapshot(entry.path()) {
                continue;
            }

            let metadata = entry.metadata().map_err(std::io::Error::from)?;
            let created = metadata.created().or_else(|_| metadata.modified())?;
            snapshots.push(CacheSnapshot {
                path: entry.into_path(),
                created,
            });
        }

        Ok(snapshots)
    }

    /// The most recently created snapshot, if any
    pub fn latest(&self) -> Result<Option<CacheSnapshot>, NoticeError> {
        let latest = self
            .snapshots()?
            .into_iter()
            .max_by(|a, b| a.created.cmp(&b.created).then_with(|| a.path.cmp(&b.path)));

        if let Some(snapshot) = &latest {
            debug!(
                "Latest cache snapshot: {} (created {})",
                snapshot.path.display(),
                DateTime::<Local>::from(snapshot.created).format("%Y-%m-%d %H:%M:%S")
            );
        }

        Ok(latest)
    }

    /// Path a snapshot named `file_name` is stored at
    pub fn snapshot_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.snapshot_path(file_name).exists()
    }

    /// Write a snapshot without ever replacing an existing file of the same name
    pub fn write(&self, file_name: &str, content: &[u8]) -> Result<WriteOutcome, NoticeError> {
        fs::create_dir_all(&self.root)?;
        let path = self.snapshot_path(file_name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                info!("Snapshot {} already cached", path.display());
                return Ok(WriteOutcome::AlreadyExists(path));
            }
            Err(e) => return Err(e.into()),
        };

        let written = file.write_all(content).and_then(|_| file.sync_all());
        if let Err(e) = written {
            // never leave a truncated snapshot behind
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }

        info!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(WriteOutcome::Written(path))
    }
}

fn is_snapshot(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION))
}
