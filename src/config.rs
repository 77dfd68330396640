//! Pack configuration: size ceiling, header byte order, TOC flag, diagnostics format.
//!
//! Values come from [`PackConfig::default`], optionally a TOML file (serde feature),
//! then command-line overrides.

use crate::diag::DiagFormat;
use crate::error::{PackError, PackResult};
use crate::format::{ByteOrder, DEFAULT_MAX_SIZE};

/// Options for one packing run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PackConfig {
    /// Ceiling in bytes for each file and for the payload total (TOC included).
    pub max_size: u64,
    /// Header byte order when no TOC is written.
    pub byte_order: ByteOrder,
    /// Emit a table of per-file offsets after the header.
    pub toc: bool,
    /// Format of the diagnostic lines.
    pub diag_format: DiagFormat,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            byte_order: ByteOrder::Big,
            toc: false,
            diag_format: DiagFormat::Text,
        }
    }
}

impl PackConfig {
    /// Reject combinations the format cannot express.
    pub fn validate(&self) -> PackResult<()> {
        if self.max_size == 0 {
            return Err(PackError::Config("max_size must be greater than 0".into()));
        }
        if self.max_size > u64::from(u32::MAX) {
            return Err(PackError::Config(format!(
                "max_size {} does not fit the 32-bit size header",
                self.max_size
            )));
        }
        if self.toc && self.byte_order == ByteOrder::Little {
            return Err(PackError::Config(
                "TOC output is always big-endian; little-endian header requires toc = false".into(),
            ));
        }
        Ok(())
    }

    /// Byte order actually used for the header word.
    #[must_use]
    pub fn header_order(&self) -> ByteOrder {
        if self.toc {
            ByteOrder::Big
        } else {
            self.byte_order
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> PackResult<Self> {
        let config: PackConfig =
            toml::from_str(s).map_err(|e| PackError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_file<P: AsRef<std::path::Path>>(path: P) -> PackResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PackError::from_io(path, e))?;
        Self::from_toml_str(&text)
    }
}
