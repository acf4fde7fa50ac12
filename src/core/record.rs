use serde::{Serialize, Serializer};
use std::fmt;

/// MAPQ value meaning "mapping quality unavailable"
pub const MAPQ_UNAVAILABLE: u8 = 255;

/// A single MAS line: chromosome, read name, read string, position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasRecord {
    /// 1-based line number in the input, counting blank and comment lines
    pub line_number: usize,

    pub chrom: String,

    pub read_name: String,

    /// Read bases, or `*` when unavailable
    pub read_str: String,

    /// Alignment start, already normalized to 1-based
    pub position: u64,
}

impl MasRecord {
    /// Number of reference bases the read covers
    #[must_use]
    pub fn aligned_length(&self) -> u64 {
        if self.read_str == "*" {
            0
        } else {
            self.read_str.len() as u64
        }
    }
}

/// CIGAR operations that a Simple-SAM record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    /// Alignment match (M)
    Match,
}

impl CigarOp {
    fn symbol(self) -> char {
        match self {
            Self::Match => 'M',
        }
    }
}

/// A CIGAR string; renders as `*` when empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar(Vec<(u64, CigarOp)>);

impl Cigar {
    /// A single match run covering `length` bases, or `*` for zero
    #[must_use]
    pub fn matched(length: u64) -> Self {
        if length == 0 {
            Self::default()
        } else {
            Self(vec![(length, CigarOp::Match)])
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn ops(&self) -> &[(u64, CigarOp)] {
        &self.0
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "*");
        }
        for (len, op) in &self.0 {
            write!(f, "{len}{}", op.symbol())?;
        }
        Ok(())
    }
}

impl Serialize for Cigar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A Simple-SAM alignment: the 11 mandatory SAM columns and nothing else
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleSamRecord {
    pub qname: String,
    pub flag: u16,
    pub rname: String,
    pub pos: u64,
    pub mapq: u8,
    pub cigar: Cigar,
    pub rnext: String,
    pub pnext: u64,
    pub tlen: i64,
    pub seq: String,
    pub qual: String,
}

impl SimpleSamRecord {
    /// Build the Simple-SAM rendition of a MAS record.
    ///
    /// The read is single-end and forward-strand (FLAG 0) with no mate and
    /// no base qualities.
    #[must_use]
    pub fn from_mas(record: &MasRecord, mapq: u8, uppercase: bool) -> Self {
        let seq = if uppercase {
            record.read_str.to_ascii_uppercase()
        } else {
            record.read_str.clone()
        };

        Self {
            qname: record.read_name.clone(),
            flag: 0,
            rname: record.chrom.clone(),
            pos: record.position,
            mapq,
            cigar: Cigar::matched(record.aligned_length()),
            rnext: "*".to_string(),
            pnext: 0,
            tlen: 0,
            seq,
            qual: "*".to_string(),
        }
    }
}
