//! Core data types for MAS to Simple-SAM conversion.
//!
//! - [`MasRecord`]: one parsed MAS line (chromosome, read name, read string, position)
//! - [`SimpleSamRecord`]: the 11 mandatory SAM columns produced for each MAS record
//! - [`Contig`] and [`SequenceDictionary`]: reference sequences used for `@SQ`
//!   header lines and for validating record coordinates
//! - [`PositionBase`], [`InvalidLineHandling`]: conversion settings
//!
//! [`MasRecord`]: record::MasRecord
//! [`SimpleSamRecord`]: record::SimpleSamRecord
//! [`Contig`]: contig::Contig
//! [`SequenceDictionary`]: dictionary::SequenceDictionary
//! [`PositionBase`]: types::PositionBase
//! [`InvalidLineHandling`]: types::InvalidLineHandling

pub mod contig;
pub mod dictionary;
pub mod record;
pub mod types;
