//! Data sources: where input file sizes and bytes come from.
//!
//! The planner only stats; the packer only opens. Keeping both behind [`DataSource`]
//! lets tests change a file between the two passes.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Provides sizes and byte streams for input identifiers.
pub trait DataSource {
    /// Byte length of `id` (stat-like; must not read the content).
    fn size(&self, id: &Path) -> io::Result<u64>;

    /// Open `id` for sequential reading. The stream is dropped once the file is emitted.
    fn open(&self, id: &Path) -> io::Result<Box<dyn Read + '_>>;
}

/// Regular files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DataSource for FsSource {
    fn size(&self, id: &Path) -> io::Result<u64> {
        let meta = std::fs::metadata(id)?;
        if !meta.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
        }
        Ok(meta.len())
    }

    fn open(&self, id: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(id)?))
    }
}

/// In-memory files keyed by path. Contents can be replaced, removed or made
/// unreadable between passes.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    denied: RwLock<HashSet<PathBuf>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(self, id: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(id, data);
        self
    }

    pub fn insert(&self, id: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.write_guard().insert(id.into(), data.into());
    }

    pub fn remove(&self, id: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.write_guard().remove(id.as_ref())
    }

    /// Make `id` fail to open with `PermissionDenied`. Its size stays visible,
    /// like a file whose read bit was cleared.
    pub fn deny(&self, id: impl Into<PathBuf>) {
        self.denied
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.into());
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.files.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lookup(&self, id: &Path) -> io::Result<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .get(id)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }
}

impl DataSource for MemorySource {
    fn size(&self, id: &Path) -> io::Result<u64> {
        Ok(self.lookup(id)?.len() as u64)
    }

    fn open(&self, id: &Path) -> io::Result<Box<dyn Read + '_>> {
        let denied = self.denied.read().unwrap_or_else(|e| e.into_inner());
        if denied.contains(id) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"));
        }
        Ok(Box::new(Cursor::new(self.lookup(id)?)))
    }
}
