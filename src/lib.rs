//! file2bin — pack input files into one size-prefixed, word-aligned binary blob.
//!
//! This crate provides:
//! - **Format** (`format`): word size, default size ceiling, [`ByteOrder`], padding arithmetic.
//! - **Config** (`config`): [`PackConfig`] (ceiling, header byte order, TOC flag), TOML loading.
//! - **Sources** (`source`): [`DataSource`] with filesystem and in-memory implementations.
//! - **Planner** (`planner`): first pass, stats inputs and builds a [`PackPlan`].
//! - **Packer** (`packer`): second pass, streams header, optional TOC and padded files.
//! - **Diagnostics** (`diag`): per-file sizes and the TOC table, never mixed into the blob.
//!
//! Output layout (see `format` for details):
//!
//! ```text
//! [u32 total_size][u32 num_files, u32 offset * n if TOC][file bytes + zero padding]...
//! ```
//!
//! With a TOC every word is big-endian. Without one the header order is
//! [`PackConfig::byte_order`], big-endian by default. No decoder is provided.

pub mod config;
pub mod diag;
pub mod error;
pub mod format;
pub mod packer;
pub mod planner;
pub mod source;

pub use config::PackConfig;
pub use diag::{DiagFormat, Diagnostics};
pub use error::{PackError, PackResult};
pub use format::{padding_for, toc_len, word_aligned, ByteOrder, DEFAULT_MAX_SIZE, WORD_SIZE};
pub use packer::{pack, pack_files};
pub use planner::{plan, InputFile, PackPlan, TocEntry};
pub use source::{DataSource, FsSource, MemorySource};
