//! file2bin: pack one or more files into a size-prefixed, word-aligned blob.
//!
//! Input: file paths in output order. Optional: --toc, --little-endian, --max-size, --config.
//! Output: the blob on stdout (or --output); sizes and the TOC table on stderr.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use file2bin::{
    pack, plan, ByteOrder, DiagFormat, Diagnostics, FsSource, PackConfig, PackError, PackPlan,
};
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DiagArg {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl From<DiagArg> for DiagFormat {
    fn from(arg: DiagArg) -> Self {
        match arg {
            DiagArg::Text => DiagFormat::Text,
            DiagArg::Json => DiagFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "file2bin",
    version,
    about = "Concatenate files into a binary starting with the total size (32 bit), each file padded to whole words"
)]
struct Cli {
    /// Input files, packed in the given order.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write a table of contents (file count + per-file offsets, big-endian) after the header.
    #[arg(short = 't', long)]
    toc: bool,

    /// Write the size header little-endian (only without --toc).
    #[arg(short = 'l', long, conflicts_with = "toc")]
    little_endian: bool,

    /// Size ceiling in bytes, per file and for the total.
    #[arg(short = 'm', long, value_name = "BYTES")]
    max_size: Option<u64>,

    /// TOML file with defaults (max_size, byte_order, toc, diag_format).
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the blob to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Format of the diagnostic lines on stderr.
    #[arg(long, value_enum)]
    diag_format: Option<DiagArg>,

    /// Do not print sizes or the TOC table.
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn pack_config(&self) -> Result<PackConfig, PackError> {
        let mut config = match &self.config {
            Some(path) => PackConfig::from_toml_file(path)?,
            None => PackConfig::default(),
        };
        if self.toc {
            config.toc = true;
        }
        if self.little_endian {
            config.byte_order = ByteOrder::Little;
        }
        if let Some(max_size) = self.max_size {
            config.max_size = max_size;
        }
        if let Some(format) = self.diag_format {
            config.diag_format = format.into();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("file2bin: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PackError> {
    let config = cli.pack_config()?;
    let diag_out: Box<dyn Write> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };
    let mut diag = Diagnostics::new(diag_out, config.diag_format);
    let source = FsSource;

    // Every input must be stat'ed and within limits before the sink is created.
    let plan = plan(&cli.files, &config, &source, &mut diag)?;

    match &cli.output {
        Some(path) => {
            reject_output_alias(path, &plan)?;
            // Written next to the target and renamed over it only once complete.
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let tmp = NamedTempFile::new_in(dir).map_err(PackError::Output)?;
            let mut out = BufWriter::new(tmp);
            pack(&mut out, &plan, &source, &mut diag)?;
            let tmp = out.into_inner().map_err(|e| PackError::Output(e.into_error()))?;
            tmp.persist(path).map_err(|e| PackError::Output(e.error))?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            pack(&mut out, &plan, &source, &mut diag)?;
            out.flush().map_err(PackError::Output)?;
        }
    }
    Ok(())
}

/// `--output` must not name one of the inputs: replacing it would destroy the input.
fn reject_output_alias(output: &Path, plan: &PackPlan) -> Result<(), PackError> {
    let Ok(output) = output.canonicalize() else {
        // Does not exist yet, so it cannot be an input.
        return Ok(());
    };
    for file in plan.files() {
        if file.path.canonicalize().ok().as_deref() == Some(output.as_path()) {
            return Err(PackError::Config(format!(
                "output {} is also an input file",
                file.path.display()
            )));
        }
    }
    Ok(())
}
