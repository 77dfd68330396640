//! file2bin binary format constants and word arithmetic.
//!
//! Layout written by the packer:
//!
//! ```text
//! [u32 total_size]                     -- excludes this word
//! [if TOC] [u32 num_files]             -- big-endian
//! [if TOC] [u32 offset_i] * num_files  -- big-endian, from start of payload
//! [file_1 bytes][zero padding to 4B]
//! ...
//! [file_n bytes][zero padding to 4B]
//! ```
//!
//! The format carries no magic, version or endianness marker. Consumers must know
//! which [`ByteOrder`] the producer was configured with.

/// Target memory is only accessible in words of this many bytes.
pub const WORD_SIZE: u32 = 4;

/// Default ceiling for a single file and for the whole payload: 16 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 16 * 1024 * 1024;

/// Byte order used for the total-size header word.
///
/// With a TOC the header and every TOC word are always [`ByteOrder::Big`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ByteOrder {
    /// Canonical mode.
    #[default]
    Big,
    Little,
}

impl ByteOrder {
    /// Encode one word in this byte order.
    #[must_use]
    pub fn encode_u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ByteOrder::Big => "big",
            ByteOrder::Little => "little",
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero bytes needed after `len` bytes to reach the next word boundary (0..=3).
#[must_use]
pub fn padding_for(len: u64) -> u32 {
    let rem = (len % u64::from(WORD_SIZE)) as u32;
    (WORD_SIZE - rem) % WORD_SIZE
}

/// `len` rounded up to a whole number of words.
#[must_use]
pub fn word_aligned(len: u64) -> u64 {
    len + u64::from(padding_for(len))
}

/// Byte length of a TOC for `num_files` entries: count word + one offset word per file.
#[must_use]
pub fn toc_len(num_files: usize) -> u64 {
    (num_files as u64 + 1) * u64::from(WORD_SIZE)
}
