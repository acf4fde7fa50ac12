//! MAS to Simple-SAM conversion.
//!
//! [`Converter`] reads records from a [`MasReader`], turns each into a
//! [`SimpleSamRecord`] and hands it to a [`RecordWriter`]. Conversion is
//! streaming and single-pass; only the optional sequence dictionary is held
//! in memory.
//!
//! ## Invalid lines
//!
//! A line is invalid if it does not split into exactly four fields, if a
//! field breaks the SAM rules for its column, or (with a dictionary) if the
//! read lies outside its reference. [`InvalidLineHandling`] decides whether
//! such a line stops the run or is skipped.
//!
//! ## Example
//!
//! ```rust
//! use mas_to_sam::convert::{ConvertOptions, Converter};
//! use mas_to_sam::output::sam::SamWriter;
//! use mas_to_sam::parsing::mas::MasReader;
//! use std::io::Cursor;
//!
//! let converter = Converter::new(ConvertOptions::default());
//! let reader = MasReader::new(Cursor::new("chr1\tread1\tACGT\t100\n"), converter.options().position_base);
//! let mut writer = SamWriter::new(Vec::new()).without_header();
//!
//! let summary = converter.run(reader, &mut writer).unwrap();
//! assert_eq!(summary.records_written, 1);
//! assert_eq!(
//!     String::from_utf8(writer.into_inner()).unwrap(),
//!     "read1\t0\tchr1\t100\t255\t4M\t*\t0\t0\tACGT\t*\n"
//! );
//! ```
//!
//! [`MasReader`]: crate::parsing::mas::MasReader
//! [`SimpleSamRecord`]: crate::core::record::SimpleSamRecord
//! [`RecordWriter`]: crate::output::RecordWriter
//! [`InvalidLineHandling`]: crate::core::types::InvalidLineHandling

pub mod engine;

pub use engine::{ConversionSummary, ConvertError, ConvertOptions, Converter};
