//! Size planner: first pass over the inputs.
//!
//! Stats every file, computes padding and the payload total, and enforces the size
//! ceiling. Nothing is written to the output until a [`PackPlan`] exists, because the
//! header must carry the total before any file byte.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PackConfig;
use crate::diag::Diagnostics;
use crate::error::{PackError, PackResult};
use crate::format::{padding_for, toc_len, ByteOrder};
use crate::source::DataSource;

/// One planned input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Byte length at planning time.
    pub size: u64,
    /// Zero bytes appended after the content (0..=3).
    pub padding: u32,
}

impl InputFile {
    /// Size plus padding; always a multiple of the word size.
    #[must_use]
    pub fn word_aligned_len(&self) -> u64 {
        self.size + u64::from(self.padding)
    }
}

/// One TOC word: offset of a file's data from the first byte after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocEntry {
    pub offset: u32,
}

/// Validated result of the planning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackPlan {
    files: Vec<InputFile>,
    total_size: u32,
    toc: bool,
    byte_order: ByteOrder,
}

impl PackPlan {
    /// Files in output order.
    #[must_use]
    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    /// Payload size sent in the header; excludes the header word itself.
    #[must_use]
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    #[must_use]
    pub fn has_toc(&self) -> bool {
        self.toc
    }

    /// Byte order of the header word (always big-endian with a TOC).
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Bytes occupied by the TOC, 0 without one.
    #[must_use]
    pub fn toc_len(&self) -> u64 {
        if self.toc {
            toc_len(self.files.len())
        } else {
            0
        }
    }

    /// Per-file offsets as they appear in the TOC. The first file starts right
    /// after the TOC itself. Empty for a plan without a TOC.
    #[must_use]
    pub fn toc_entries(&self) -> Vec<TocEntry> {
        if !self.toc {
            return Vec::new();
        }
        let mut offset = self.toc_len();
        self.files
            .iter()
            .map(|file| {
                // total_size fits u32 and every offset is below it.
                let entry = TocEntry { offset: offset as u32 };
                offset += file.word_aligned_len();
                entry
            })
            .collect()
    }
}

/// Stat `files` in order and build a [`PackPlan`].
///
/// Fails on the first missing/unreadable file or when a file or the total exceeds
/// `config.max_size`. Per-file sizes and running totals go to `diag`.
pub fn plan<P, W>(
    files: &[P],
    config: &PackConfig,
    source: &dyn DataSource,
    diag: &mut Diagnostics<W>,
) -> PackResult<PackPlan>
where
    P: AsRef<Path>,
    W: Write,
{
    config.validate()?;
    if files.is_empty() {
        return Err(PackError::NoInputs);
    }

    let limit = config.max_size;
    let mut planned = Vec::with_capacity(files.len());
    let mut total: u64 = 0;

    for path in files {
        let path = path.as_ref();
        let size = source
            .size(path)
            .map_err(|e| PackError::from_io(path, e))?;
        if size > limit {
            return Err(PackError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }

        let file = InputFile {
            path: path.to_path_buf(),
            size,
            padding: padding_for(size),
        };
        total += file.word_aligned_len();
        debug!(path = %path.display(), size, padding = file.padding, total, "planned file");
        diag.file_planned(&file, total);
        planned.push(file);
    }

    if config.toc {
        let toc_bytes = toc_len(planned.len());
        total += toc_bytes;
        diag.toc_reserved(toc_bytes, total);
    }

    if total > limit {
        return Err(PackError::TotalTooLarge { size: total, limit });
    }

    Ok(PackPlan {
        files: planned,
        // limit <= u32::MAX is checked by validate()
        total_size: total as u32,
        toc: config.toc,
        byte_order: config.header_order(),
    })
}
