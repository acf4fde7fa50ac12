use serde::Serialize;
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::dictionary::SequenceDictionary;
use crate::core::record::{MasRecord, SimpleSamRecord, MAPQ_UNAVAILABLE};
use crate::core::types::{InvalidLineHandling, PositionBase};
use crate::output::{ProgramRecord, RecordWriter, SamHeader};
use crate::parsing::mas::{MasError, MasReader};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Mas(MasError),

    #[error("Line {line}: reference '{name}' is not in the sequence dictionary")]
    UnknownReference { line: usize, name: String },

    #[error(
        "Line {line}: read '{read_name}' ends at {end}, past the end of '{name}' (length {length})"
    )]
    BeyondReferenceEnd {
        line: usize,
        read_name: String,
        name: String,
        end: u64,
        length: u64,
    },
}

impl From<MasError> for ConvertError {
    fn from(err: MasError) -> Self {
        match err {
            MasError::Io(e) => Self::Io(e),
            other => Self::Mas(other),
        }
    }
}

impl ConvertError {
    /// The 1-based input line the error refers to, if any
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::Mas(e) => e.line(),
            Self::UnknownReference { line, .. } | Self::BeyondReferenceEnd { line, .. } => {
                Some(*line)
            }
        }
    }

    /// Whether the error is confined to a single input line (and so may be skipped)
    #[must_use]
    pub fn is_line_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Settings for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// How the MAS position column is interpreted
    pub position_base: PositionBase,
    /// What to do with lines that cannot be converted
    pub invalid_lines: InvalidLineHandling,
    /// MAPQ written to every record
    pub mapq: u8,
    /// Upper-case read strings on output
    pub uppercase: bool,
    /// Reference contigs for `@SQ` lines and coordinate checks
    pub dictionary: Option<SequenceDictionary>,
    /// `@PG` record for the output header
    pub program: ProgramRecord,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            position_base: PositionBase::OneBased,
            invalid_lines: InvalidLineHandling::Fail,
            mapq: MAPQ_UNAVAILABLE,
            uppercase: false,
            dictionary: None,
            program: ProgramRecord::default(),
        }
    }
}

/// Counts from a finished conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Input lines consumed, including blank and comment lines
    pub lines_read: usize,
    pub records_written: usize,
    /// Invalid lines dropped under `warn` or `silent` handling
    pub lines_skipped: usize,
    /// Distinct reference names among written records
    pub references_seen: usize,
}

/// Streams MAS records into a [`RecordWriter`]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// The output header: dictionary contigs (if any) and the `@PG` record
    #[must_use]
    pub fn header(&self) -> SamHeader {
        SamHeader {
            contigs: self
                .options
                .dictionary
                .as_ref()
                .map(|d| d.contigs.clone())
                .unwrap_or_default(),
            program: self.options.program.clone(),
        }
    }

    /// Convert one MAS record, checking it against the dictionary when present.
    ///
    /// A record that names a dictionary alias is written under the contig's
    /// primary name so it matches the `@SQ` lines.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::UnknownReference` if the chromosome is not in the
    /// dictionary, or `ConvertError::BeyondReferenceEnd` if the read runs past
    /// the end of its contig.
    pub fn convert_record(&self, record: &MasRecord) -> Result<SimpleSamRecord, ConvertError> {
        let mut converted =
            SimpleSamRecord::from_mas(record, self.options.mapq, self.options.uppercase);

        if let Some(dictionary) = &self.options.dictionary {
            let contig =
                dictionary
                    .get(&record.chrom)
                    .ok_or_else(|| ConvertError::UnknownReference {
                        line: record.line_number,
                        name: record.chrom.clone(),
                    })?;

            let span = record.aligned_length();
            if !contig.contains_span(record.position, span) {
                return Err(ConvertError::BeyondReferenceEnd {
                    line: record.line_number,
                    read_name: record.read_name.clone(),
                    name: contig.name.clone(),
                    end: record.position + span.saturating_sub(1),
                    length: contig.length,
                });
            }

            converted.rname.clone_from(&contig.name);
        }

        Ok(converted)
    }

    /// Convert every record from `reader` into `writer`.
    ///
    /// The header is written first. Writer output is flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Io` on any read or write failure. Under
    /// `InvalidLineHandling::Fail`, the first invalid line is returned as an
    /// error; otherwise invalid lines are counted and skipped.
    pub fn run<R: BufRead, W: RecordWriter>(
        &self,
        mut reader: MasReader<R>,
        writer: &mut W,
    ) -> Result<ConversionSummary, ConvertError> {
        debug!(
            position_base = ?self.options.position_base,
            invalid_lines = %self.options.invalid_lines,
            mapq = self.options.mapq,
            dictionary_contigs = self.options.dictionary.as_ref().map_or(0, SequenceDictionary::len),
            "Starting conversion"
        );

        writer.write_header(&self.header())?;

        let mut summary = ConversionSummary::default();
        let mut references: HashSet<String> = HashSet::new();

        for item in reader.by_ref() {
            let converted = item
                .map_err(ConvertError::from)
                .and_then(|record| self.convert_record(&record));

            match converted {
                Ok(record) => {
                    if !references.contains(&record.rname) {
                        references.insert(record.rname.clone());
                    }
                    writer.write_record(&record)?;
                    summary.records_written += 1;
                }
                Err(err) if err.is_line_error() => self.handle_invalid(err, &mut summary)?,
                Err(err) => return Err(err),
            }
        }

        writer.finish()?;

        summary.lines_read = reader.lines_read();
        summary.references_seen = references.len();

        info!(
            lines = summary.lines_read,
            records = summary.records_written,
            skipped = summary.lines_skipped,
            references = summary.references_seen,
            "Conversion finished"
        );

        Ok(summary)
    }

    fn handle_invalid(
        &self,
        err: ConvertError,
        summary: &mut ConversionSummary,
    ) -> Result<(), ConvertError> {
        match self.options.invalid_lines {
            InvalidLineHandling::Fail => Err(err),
            InvalidLineHandling::Warn => {
                warn!(line = ?err.line(), "Skipping invalid MAS line: {err}");
                summary.lines_skipped += 1;
                Ok(())
            }
            InvalidLineHandling::Silent => {
                summary.lines_skipped += 1;
                Ok(())
            }
        }
    }
}
