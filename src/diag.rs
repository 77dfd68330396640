//! Advisory diagnostic channel (sizes, running totals, TOC table).
//!
//! Never the binary output stream. Write failures here are ignored: a closed stderr
//! must not abort a pack.

use std::io::Write;

use crate::format::ByteOrder;
use crate::planner::{InputFile, PackPlan, TocEntry};

/// Rendering of diagnostic lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiagFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Diagnostic sink used by the planner and packer.
pub struct Diagnostics<W: Write> {
    out: W,
    format: DiagFormat,
}

impl Diagnostics<std::io::Sink> {
    /// Discard everything.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(std::io::sink(), DiagFormat::Text)
    }
}

impl<W: Write> Diagnostics<W> {
    pub fn new(out: W, format: DiagFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub(crate) fn file_planned(&mut self, file: &InputFile, running_total: u64) {
        let line = match self.format {
            DiagFormat::Text => format!(
                "File {} size: {}, padding: {}, total: {}",
                file.path.display(),
                file.size,
                file.padding,
                running_total
            ),
            DiagFormat::Json => serde_json::json!({
                "event": "file",
                "path": file.path.display().to_string(),
                "size": file.size,
                "padding": file.padding,
                "total": running_total,
            })
            .to_string(),
        };
        self.line(&line);
    }

    pub(crate) fn toc_reserved(&mut self, toc_bytes: u64, total: u64) {
        let line = match self.format {
            DiagFormat::Text => format!("TOC size: {}, total: {}", toc_bytes, total),
            DiagFormat::Json => serde_json::json!({
                "event": "toc",
                "size": toc_bytes,
                "total": total,
            })
            .to_string(),
        };
        self.line(&line);
    }

    /// Header value and the byte order it was written in.
    pub(crate) fn header(&mut self, total_size: u32, order: ByteOrder) {
        let line = match self.format {
            DiagFormat::Text => format!("Header: {} bytes, {}-endian", total_size, order),
            DiagFormat::Json => serde_json::json!({
                "event": "header",
                "total": total_size,
                "byte_order": order.as_str(),
            })
            .to_string(),
        };
        self.line(&line);
    }

    pub(crate) fn toc_table(&mut self, plan: &PackPlan, entries: &[TocEntry]) {
        match self.format {
            DiagFormat::Text => {
                self.line(&format!("TOC: {} files", entries.len()));
                for (i, (entry, file)) in entries.iter().zip(plan.files()).enumerate() {
                    self.line(&format!(
                        "  [{:>3}] offset {:>10} (0x{:08x}) {}",
                        i,
                        entry.offset,
                        entry.offset,
                        file.path.display()
                    ));
                }
            }
            DiagFormat::Json => {
                let offsets: Vec<_> = entries
                    .iter()
                    .zip(plan.files())
                    .map(|(entry, file)| {
                        serde_json::json!({
                            "path": file.path.display().to_string(),
                            "offset": entry.offset,
                        })
                    })
                    .collect();
                let line = serde_json::json!({ "event": "toc_table", "entries": offsets });
                self.line(&line.to_string());
            }
        }
    }

    pub(crate) fn packed(&mut self, bytes_written: u64) {
        let line = match self.format {
            DiagFormat::Text => format!("Wrote {} bytes", bytes_written),
            DiagFormat::Json => {
                serde_json::json!({ "event": "done", "bytes": bytes_written }).to_string()
            }
        };
        self.line(&line);
    }

    fn line(&mut self, line: &str) {
        let _ = writeln!(self.out, "{}", line);
    }
}
