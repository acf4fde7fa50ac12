//! Parsers for MAS input and for reference sequence dictionaries.
//!
//! - **MAS files** ([`mas`]): the four-column alignment input being converted
//! - **SAM/BAM/CRAM files** ([`sam`]): `@SQ` lines from alignment file headers
//! - **Picard .dict files** ([`dict`]): sequence dictionary files
//! - **FASTA index (.fai) files** ([`fai`]): name and length of each sequence
//!
//! A dictionary is optional for conversion. When given, its contigs become the
//! `@SQ` lines of the output header and every record is checked against it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mas_to_sam::core::types::PositionBase;
//! use mas_to_sam::parsing::{mas, parse_dictionary};
//! use std::path::Path;
//!
//! let dictionary = parse_dictionary(Path::new("hg38.dict")).unwrap();
//! let input = mas::open_input(Path::new("reads.mas")).unwrap();
//!
//! for record in mas::MasReader::new(input, PositionBase::OneBased) {
//!     let record = record.unwrap();
//!     assert!(dictionary.get(&record.chrom).is_some());
//! }
//! ```
//!
//! ## Supported `@SQ` Tags
//!
//! | Tag | Description | Required |
//! |-----|-------------|----------|
//! | SN  | Sequence name | Yes |
//! | LN  | Sequence length | Yes |
//! | M5  | MD5 checksum | No |
//! | AS  | Assembly identifier | No |
//! | UR  | URI for sequence | No |
//! | SP  | Species | No |
//! | AN  | Alternate names (aliases) | No |

use std::path::Path;

use crate::core::dictionary::SequenceDictionary;
use crate::parsing::sam::ParseError;

pub mod dict;
pub mod fai;
pub mod mas;
pub mod sam;

/// Load a sequence dictionary, choosing the parser from the file extension.
///
/// `.sam`, `.bam` and `.cram` are read through their headers, `.dict` as a
/// Picard dictionary and `.fai` as a FASTA index. Anything else is read as
/// SAM header text.
///
/// # Errors
///
/// Returns a `ParseError` if the file cannot be read or holds no contigs.
pub fn parse_dictionary(path: &Path) -> Result<SequenceDictionary, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("sam" | "bam" | "cram") => sam::parse_file(path),
        Some("fai") => fai::parse_fai_file(path),
        _ => dict::parse_dict_file(path),
    }
}
