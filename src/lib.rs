//! # mas-to-sam
//!
//! A library and command-line tool for converting MAS alignments into Simple-SAM.
//!
//! MAS is a minimal tab-delimited alignment format with one read per line:
//!
//! ```text
//! chr1	read_0001	ACGTACGTAC	10468
//! ```
//!
//! The four fields are the chromosome, read name, read string and position.
//! Simple-SAM is SAM reduced to its 11 mandatory columns. Each read becomes a
//! single-end, forward-strand alignment with an all-match CIGAR and no base
//! qualities.
//!
//! ## Features
//!
//! - **Streaming conversion**: constant memory regardless of input size
//! - **Strict validation**: field count, SAM name and sequence rules, position range
//! - **Dictionary support**: `@SQ` lines and coordinate checks from SAM/BAM/CRAM, `.dict` or `.fai`
//! - **Recovery**: fail on, warn about, or silently skip malformed lines
//! - **Transparent gzip**: compressed input is detected from its magic bytes
//!
//! ## Example
//!
//! ```rust
//! use mas_to_sam::{ConvertOptions, Converter, MasReader};
//! use mas_to_sam::output::sam::SamWriter;
//! use std::io::Cursor;
//!
//! let converter = Converter::new(ConvertOptions::default());
//! let reader = MasReader::new(Cursor::new("chr1\tr1\tACGT\t10\n"), converter.options().position_base);
//! let mut writer = SamWriter::new(Vec::new());
//!
//! converter.run(reader, &mut writer).unwrap();
//! let sam = String::from_utf8(writer.into_inner()).unwrap();
//! assert!(sam.starts_with("@HD\tVN:1.6"));
//! assert!(sam.ends_with("r1\t0\tchr1\t10\t255\t4M\t*\t0\t0\tACGT\t*\n"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: MAS and Simple-SAM records, contigs and sequence dictionaries
//! - [`parsing`]: MAS reader and sequence dictionary parsers
//! - [`convert`]: the conversion engine
//! - [`output`]: SAM and JSON-lines writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod convert;
pub mod core;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::convert::{ConversionSummary, ConvertError, ConvertOptions, Converter};
pub use crate::core::contig::Contig;
pub use crate::core::dictionary::SequenceDictionary;
pub use crate::core::record::{MasRecord, SimpleSamRecord};
pub use crate::core::types::*;
pub use crate::parsing::mas::{MasError, MasReader};
