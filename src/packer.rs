//! Stream packer: second pass, writes the blob.
//!
//! Header word, then the TOC (if planned), then every file re-read from the source,
//! word-aligned with zero padding. Output is strictly sequential; the sink is never
//! seeked, so pipes work.
//!
//! A failure here can leave a partial blob in the sink. The format has no checksum or
//! resumption marker, so such output must be discarded, never resumed.

use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::PackConfig;
use crate::diag::Diagnostics;
use crate::error::{PackError, PackResult};
use crate::format::{ByteOrder, WORD_SIZE};
use crate::planner::{plan, InputFile, PackPlan};
use crate::source::DataSource;

/// Bulk copy buffer; a multiple of the word size.
const COPY_CHUNK: usize = 64 * 1024;

/// Write the blob described by `plan` to `out`. Returns the number of bytes written
/// (header word included).
///
/// Files are opened one at a time and closed before the next one is touched.
pub fn pack<W, D>(
    out: &mut W,
    plan: &PackPlan,
    source: &dyn DataSource,
    diag: &mut Diagnostics<D>,
) -> PackResult<u64>
where
    W: Write + ?Sized,
    D: Write,
{
    // --- Header ---
    write_word(out, plan.byte_order(), plan.total_size())?;
    diag.header(plan.total_size(), plan.byte_order());

    // --- TOC ---
    if plan.has_toc() {
        let entries = plan.toc_entries();
        write_word(out, ByteOrder::Big, plan.files().len() as u32)?;
        for entry in &entries {
            write_word(out, ByteOrder::Big, entry.offset)?;
        }
        diag.toc_table(plan, &entries);
    }

    // --- Files ---
    for file in plan.files() {
        let mut reader = source
            .open(&file.path)
            .map_err(|e| PackError::from_io(&file.path, e))?;
        emit_file(out, &mut reader, file)?;
        debug!(path = %file.path.display(), size = file.size, padding = file.padding, "packed file");
    }

    let written = u64::from(WORD_SIZE) + u64::from(plan.total_size());
    info!(
        files = plan.files().len(),
        bytes = written,
        toc = plan.has_toc(),
        byte_order = %plan.byte_order(),
        "pack complete"
    );
    diag.packed(written);
    Ok(written)
}

/// Plan then pack in one call. Planning errors leave `out` untouched.
pub fn pack_files<P, W, D>(
    files: &[P],
    config: &PackConfig,
    source: &dyn DataSource,
    out: &mut W,
    diag: &mut Diagnostics<D>,
) -> PackResult<u64>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
    D: Write,
{
    let plan = plan(files, config, source, diag)?;
    pack(out, &plan, source, diag)
}

fn write_word<W: Write + ?Sized>(out: &mut W, order: ByteOrder, value: u32) -> PackResult<()> {
    out.write_all(&order.encode_u32(value)).map_err(PackError::Output)
}

/// Copy exactly `file.size` bytes plus padding. Full words go through the bulk buffer;
/// the trailing partial word is read into a zeroed word buffer and written whole.
fn emit_file<W: Write + ?Sized>(
    out: &mut W,
    reader: &mut dyn Read,
    file: &InputFile,
) -> PackResult<()> {
    let tail = (file.size % u64::from(WORD_SIZE)) as usize;
    let mut body = file.size - tail as u64;
    let mut buf = vec![0u8; COPY_CHUNK];

    while body > 0 {
        let want = body.min(COPY_CHUNK as u64) as usize;
        let got = read_full(reader, &mut buf[..want], &file.path)?;
        out.write_all(&buf[..got]).map_err(PackError::Output)?;
        body -= got as u64;
        if got < want {
            return Err(PackError::ShortRead {
                path: file.path.clone(),
                remaining: body + tail as u64,
            });
        }
    }

    if tail > 0 {
        let mut word = [0u8; WORD_SIZE as usize];
        let got = read_full(reader, &mut word[..tail], &file.path)?;
        if got < tail {
            out.write_all(&word[..got]).map_err(PackError::Output)?;
            return Err(PackError::ShortRead {
                path: file.path.clone(),
                remaining: (tail - got) as u64,
            });
        }
        out.write_all(&word).map_err(PackError::Output)?;
    }

    let mut probe = [0u8; 1];
    if read_full(reader, &mut probe, &file.path)? > 0 {
        warn!(
            path = %file.path.display(),
            planned = file.size,
            "file grew after planning; only the planned bytes were packed"
        );
    }
    Ok(())
}

/// Fill `buf` unless EOF comes first. Returns the number of bytes read.
fn read_full(reader: &mut dyn Read, buf: &mut [u8], path: &Path) -> PackResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(PackError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }
    Ok(filled)
}
