use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while planning or packing. All of them abort the run.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("no input files given")]
    NoInputs,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to open input file: {}, reason: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input file: {}, reason: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file size is too big: {}: {size} bytes (limit {limit} bytes)", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("total size is too big: {size} bytes (limit {limit} bytes)")]
    TotalTooLarge { size: u64, limit: u64 },
    #[error("failed to read complete file: {}, {remaining} bytes remaining", .path.display())]
    ShortRead { path: PathBuf, remaining: u64 },
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl PackError {
    /// Classify an io error raised while accessing `path`.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            PackError::NotFound { path, source }
        } else {
            PackError::Io { path, source }
        }
    }

    /// True for both the per-file and the aggregate ceiling.
    #[must_use]
    pub fn is_too_large(&self) -> bool {
        matches!(self, PackError::FileTooLarge { .. } | PackError::TotalTooLarge { .. })
    }
}

pub type PackResult<T> = Result<T, PackError>;
