//! Writers for converted records.
//!
//! - [`sam::SamWriter`]: Simple-SAM text with an optional header, written with noodles
//! - [`json::JsonLinesWriter`]: one JSON object per record, keyed by SAM column name

use noodles::sam::header::record::value::map::header::Version;
use std::io;

use crate::core::contig::Contig;
use crate::core::record::SimpleSamRecord;

pub mod json;
pub mod sam;

/// SAM format version written to `@HD VN`
pub const SAM_VERSION: Version = Version::new(1, 6);

/// Program ID and name written to `@PG`
pub const PROGRAM_NAME: &str = "mas-to-sam";

/// The `@PG` record describing this conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    pub command_line: Option<String>,
}

impl Default for ProgramRecord {
    fn default() -> Self {
        Self {
            id: PROGRAM_NAME.to_string(),
            name: PROGRAM_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            command_line: None,
        }
    }
}

impl ProgramRecord {
    #[must_use]
    pub fn with_command_line(mut self, command_line: impl Into<String>) -> Self {
        self.command_line = Some(command_line.into());
        self
    }
}

/// Everything that goes into an output header
#[derive(Debug, Clone, Default)]
pub struct SamHeader {
    /// Contigs for `@SQ` lines, in dictionary order
    pub contigs: Vec<Contig>,
    pub program: ProgramRecord,
}

/// A sink for converted records
pub trait RecordWriter {
    /// Write the header. Called once, before any record.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    fn write_header(&mut self, header: &SamHeader) -> io::Result<()>;

    /// Write one record.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    fn write_record(&mut self, record: &SimpleSamRecord) -> io::Result<()>;

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if flushing fails.
    fn finish(&mut self) -> io::Result<()>;
}

impl<T: RecordWriter + ?Sized> RecordWriter for Box<T> {
    fn write_header(&mut self, header: &SamHeader) -> io::Result<()> {
        (**self).write_header(header)
    }

    fn write_record(&mut self, record: &SimpleSamRecord) -> io::Result<()> {
        (**self).write_record(record)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}
