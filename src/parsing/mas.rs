//! Reader for MAS alignment files.
//!
//! A MAS line holds four tab-separated fields:
//!
//! ```text
//! chrom<TAB>read_name<TAB>read_str<TAB>pos
//! ```
//!
//! Empty lines and lines starting with `#` are skipped. Every other line must
//! have exactly four fields.

use flate2::read::MultiGzDecoder;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::core::record::MasRecord;
use crate::core::types::PositionBase;
use crate::utils::validation::{
    is_valid_read_name, is_valid_reference_name, is_valid_sequence, MAX_POSITION,
};

/// Number of fields on a MAS line
pub const MAS_FIELD_COUNT: usize = 4;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Error, Debug)]
pub enum MasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Line {line}: expected {MAS_FIELD_COUNT} tab-separated fields (chrom, read name, read string, position), found {found}"
    )]
    FieldCount { line: usize, found: usize },

    #[error("Line {line}: invalid reference name '{value}'")]
    InvalidReferenceName { line: usize, value: String },

    #[error("Line {line}: invalid read name '{value}'")]
    InvalidReadName { line: usize, value: String },

    #[error("Line {line}: invalid read string for read '{read_name}'")]
    InvalidSequence { line: usize, read_name: String },

    #[error("Line {line}: invalid position '{value}'")]
    InvalidPosition { line: usize, value: String },

    #[error("Line {line}: position {position} is outside 1..={MAX_POSITION}")]
    PositionOutOfRange { line: usize, position: u64 },

    #[error("Line {line}: not valid UTF-8")]
    InvalidEncoding { line: usize },
}

impl MasError {
    /// The 1-based input line the error refers to, if any
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::FieldCount { line, .. }
            | Self::InvalidReferenceName { line, .. }
            | Self::InvalidReadName { line, .. }
            | Self::InvalidSequence { line, .. }
            | Self::InvalidPosition { line, .. }
            | Self::PositionOutOfRange { line, .. }
            | Self::InvalidEncoding { line } => Some(*line),
        }
    }
}

/// Open a MAS input for line-by-line reading.
///
/// `-` reads standard input. Gzip (and bgzip) input is detected from its
/// magic bytes and decompressed transparently.
///
/// # Errors
///
/// Returns `MasError::Io` if the file cannot be opened or read.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, MasError> {
    let source: Box<dyn Read> = if path.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(std::fs::File::open(path)?)
    };

    wrap_input(source)
}

fn wrap_input(source: Box<dyn Read>) -> Result<Box<dyn BufRead>, MasError> {
    let mut reader = BufReader::new(source);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Parse one MAS line into a record.
///
/// `line_number` is 1-based and only used for error reporting.
///
/// # Errors
///
/// Returns `MasError::FieldCount` unless the line has exactly four fields,
/// or a validation error for the offending field.
pub fn parse_mas_line(
    line: &str,
    line_number: usize,
    base: PositionBase,
) -> Result<MasRecord, MasError> {
    let line = trim_line_ending(line);
    let fields: Vec<&str> = line.split('\t').collect();

    let &[chrom, read_name, read_str, pos] = fields.as_slice() else {
        return Err(MasError::FieldCount {
            line: line_number,
            found: fields.len(),
        });
    };

    if !is_valid_reference_name(chrom) {
        return Err(MasError::InvalidReferenceName {
            line: line_number,
            value: chrom.to_string(),
        });
    }

    if !is_valid_read_name(read_name) {
        return Err(MasError::InvalidReadName {
            line: line_number,
            value: read_name.to_string(),
        });
    }

    if !is_valid_sequence(read_str) {
        return Err(MasError::InvalidSequence {
            line: line_number,
            read_name: read_name.to_string(),
        });
    }

    let raw: u64 = pos.trim().parse().map_err(|_| MasError::InvalidPosition {
        line: line_number,
        value: pos.to_string(),
    })?;

    let position = raw.saturating_add(base.offset());
    if position == 0 || position > MAX_POSITION {
        return Err(MasError::PositionOutOfRange {
            line: line_number,
            position,
        });
    }

    Ok(MasRecord {
        line_number,
        chrom: chrom.to_string(),
        read_name: read_name.to_string(),
        read_str: read_str.to_string(),
        position,
    })
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Streaming iterator over the records of a MAS input.
///
/// Yields one `Result` per data line. A line that is not valid UTF-8 yields
/// `MasError::InvalidEncoding` and reading continues. An I/O error is yielded
/// once and ends the iteration.
pub struct MasReader<R> {
    inner: R,
    base: PositionBase,
    line_number: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> MasReader<R> {
    pub fn new(inner: R, base: PositionBase) -> Self {
        Self {
            inner,
            base,
            line_number: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Number of lines consumed so far, including skipped ones
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for MasReader<R> {
    type Item = Result<MasRecord, MasError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.line_number += 1;
                    let Ok(line) = std::str::from_utf8(&self.buf) else {
                        return Some(Err(MasError::InvalidEncoding {
                            line: self.line_number,
                        }));
                    };
                    let line = trim_line_ending(line);
                    if line.trim().is_empty() || line.starts_with('#') {
                        continue;
                    }
                    return Some(parse_mas_line(line, self.line_number, self.base));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
