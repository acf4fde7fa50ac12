use noodles::core::Position;
use noodles::sam;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record::cigar::op::{Kind, Op};
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::{Cigar as CigarBuf, Sequence};
use noodles::sam::alignment::RecordBuf;
use noodles::sam::header::record::value::map::header::{sort_order, tag as header_tag};
use noodles::sam::header::record::value::map::program::tag as program_tag;
use noodles::sam::header::record::value::map::reference_sequence::tag as sq_tag;
use noodles::sam::header::record::value::map::{self, Program, ReferenceSequence};
use noodles::sam::header::record::value::Map;
use std::io::{self, Write};
use std::num::NonZeroUsize;

use crate::core::contig::Contig;
use crate::core::record::{Cigar, CigarOp, SimpleSamRecord};
use crate::output::{ProgramRecord, RecordWriter, SamHeader, SAM_VERSION};

/// Writes Simple-SAM text through the noodles SAM writer
pub struct SamWriter<W: Write> {
    inner: sam::io::Writer<W>,
    header: sam::Header,
    write_header: bool,
}

impl<W: Write> SamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: sam::io::Writer::new(inner),
            header: sam::Header::default(),
            write_header: true,
        }
    }

    /// Suppress the `@HD`/`@SQ`/`@PG` header
    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.write_header = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    /// Index of `name` among the header's reference sequences.
    ///
    /// Names without an `@SQ` line are appended after the header has been
    /// written, so they only serve record lookups.
    fn reference_sequence_id(&mut self, name: &str) -> usize {
        let reference_sequences = self.header.reference_sequences_mut();

        if let Some(id) = reference_sequences.get_index_of(name.as_bytes()) {
            return id;
        }

        let (id, _) = reference_sequences.insert_full(
            name.into(),
            Map::<ReferenceSequence>::new(NonZeroUsize::MIN),
        );
        id
    }
}

/// Build the noodles header: `@HD`, one `@SQ` per contig, then `@PG`
///
/// # Errors
///
/// Returns an `InvalidInput` error if a contig has length 0 or does not fit
/// in `usize`.
pub fn build_header(header: &SamHeader) -> io::Result<sam::Header> {
    let mut hd = Map::<map::Header>::new(SAM_VERSION);
    hd.other_fields_mut()
        .insert(header_tag::SORT_ORDER, sort_order::UNSORTED.into());

    let mut builder = sam::Header::builder().set_header(hd);

    for contig in &header.contigs {
        builder = builder.add_reference_sequence(contig.name.as_str(), reference_sequence(contig)?);
    }

    let program = &header.program;
    builder = builder.add_program(program.id.as_str(), program_map(program));

    Ok(builder.build())
}

fn reference_sequence(contig: &Contig) -> io::Result<Map<ReferenceSequence>> {
    let length = usize::try_from(contig.length)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid length {} for contig '{}'", contig.length, contig.name),
            )
        })?;

    let mut map = Map::<ReferenceSequence>::new(length);
    let fields = map.other_fields_mut();

    if let Some(md5) = &contig.md5 {
        fields.insert(sq_tag::MD5_CHECKSUM, md5.as_str().into());
    }
    if let Some(assembly) = &contig.assembly {
        fields.insert(sq_tag::ASSEMBLY_ID, assembly.as_str().into());
    }
    if let Some(uri) = &contig.uri {
        fields.insert(sq_tag::URI, uri.as_str().into());
    }
    if let Some(species) = &contig.species {
        fields.insert(sq_tag::SPECIES, species.as_str().into());
    }
    if !contig.aliases.is_empty() {
        fields.insert(sq_tag::ALTERNATIVE_NAMES, contig.aliases.join(",").into());
    }

    Ok(map)
}

fn program_map(program: &ProgramRecord) -> Map<Program> {
    let mut map = Map::<Program>::default();
    let fields = map.other_fields_mut();

    fields.insert(program_tag::NAME, program.name.as_str().into());
    fields.insert(program_tag::VERSION, program.version.as_str().into());
    if let Some(command_line) = &program.command_line {
        fields.insert(program_tag::COMMAND_LINE, header_value(command_line).into());
    }

    map
}

/// Header values are limited to printable ASCII
fn header_value(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' '..='~' => c,
            c if c.is_whitespace() => ' ',
            _ => '?',
        })
        .collect()
}

fn cigar_buf(cigar: &Cigar) -> io::Result<CigarBuf> {
    cigar
        .ops()
        .iter()
        .map(|&(len, op)| {
            let len = usize::try_from(len)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let kind = match op {
                CigarOp::Match => Kind::Match,
            };
            Ok(Op::new(kind, len))
        })
        .collect()
}

impl<W: Write> RecordWriter for SamWriter<W> {
    fn write_header(&mut self, header: &SamHeader) -> io::Result<()> {
        self.header = build_header(header)?;

        if self.write_header {
            self.inner.write_header(&self.header)?;
        }

        Ok(())
    }

    fn write_record(&mut self, record: &SimpleSamRecord) -> io::Result<()> {
        let reference_sequence_id = self.reference_sequence_id(&record.rname);

        let sequence = if record.seq == "*" {
            Sequence::default()
        } else {
            Sequence::from(record.seq.as_bytes())
        };

        let mut buf = RecordBuf::builder()
            .set_name(record.qname.as_str())
            .set_flags(Flags::from(record.flag))
            .set_reference_sequence_id(reference_sequence_id)
            .set_cigar(cigar_buf(&record.cigar)?)
            .set_sequence(sequence)
            .build();

        *buf.alignment_start_mut() = usize::try_from(record.pos).ok().and_then(Position::new);
        *buf.mapping_quality_mut() = MappingQuality::new(record.mapq);

        self.inner.write_alignment_record(&self.header, &buf)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.get_mut().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{MasRecord, MAPQ_UNAVAILABLE};

    fn header() -> SamHeader {
        let chr1 = Contig::new("chr1", 1000)
            .with_md5("6aef897c3d6ff0c78aff06ac189178dd")
            .with_aliases(&["1", "NC_000001.11"]);

        SamHeader {
            contigs: vec![chr1, Contig::new("chr2", 500)],
            program: ProgramRecord {
                id: "mas-to-sam".to_string(),
                name: "mas-to-sam".to_string(),
                version: "0.1.0".to_string(),
                command_line: Some("mas-to-sam\treads.mas".to_string()),
            },
        }
    }

    fn record(chrom: &str, read_str: &str) -> SimpleSamRecord {
        let mas = MasRecord {
            line_number: 1,
            chrom: chrom.to_string(),
            read_name: "r1".to_string(),
            read_str: read_str.to_string(),
            position: 10,
        };
        SimpleSamRecord::from_mas(&mas, MAPQ_UNAVAILABLE, false)
    }

    fn written(writer: SamWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_write_header_and_record() {
        let mut writer = SamWriter::new(Vec::new());
        writer.write_header(&header()).unwrap();
        writer.write_record(&record("chr1", "ACGT")).unwrap();
        writer.finish().unwrap();

        let text = written(writer);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "@HD\tVN:1.6\tSO:unsorted");
        assert_eq!(
            lines[1],
            "@SQ\tSN:chr1\tLN:1000\tM5:6aef897c3d6ff0c78aff06ac189178dd\tAN:1,NC_000001.11"
        );
        assert_eq!(lines[2], "@SQ\tSN:chr2\tLN:500");
        assert_eq!(
            lines[3],
            "@PG\tID:mas-to-sam\tPN:mas-to-sam\tVN:0.1.0\tCL:mas-to-sam reads.mas"
        );
        assert_eq!(lines[4], "r1\t0\tchr1\t10\t255\t4M\t*\t0\t0\tACGT\t*");
    }

    #[test]
    fn test_without_header() {
        let mut writer = SamWriter::new(Vec::new()).without_header();
        writer.write_header(&header()).unwrap();
        writer.write_record(&record("chr1", "ACGT")).unwrap();

        assert_eq!(written(writer), "r1\t0\tchr1\t10\t255\t4M\t*\t0\t0\tACGT\t*\n");
    }

    #[test]
    fn test_reference_without_sq_line() {
        let mut writer = SamWriter::new(Vec::new());
        writer.write_header(&SamHeader::default()).unwrap();
        writer.write_record(&record("chrX", "GG")).unwrap();
        writer.write_record(&record("chrY", "*")).unwrap();
        writer.write_record(&record("chrX", "A")).unwrap();

        let text = written(writer);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("@PG\t"));
        assert_eq!(lines[2], "r1\t0\tchrX\t10\t255\t2M\t*\t0\t0\tGG\t*");
        assert_eq!(lines[3], "r1\t0\tchrY\t10\t255\t*\t*\t0\t0\t*\t*");
        assert_eq!(lines[4], "r1\t0\tchrX\t10\t255\t1M\t*\t0\t0\tA\t*");
    }

    #[test]
    fn test_mapq_written() {
        let mut writer = SamWriter::new(Vec::new()).without_header();
        let mut sam = record("chr1", "ACGT");
        sam.mapq = 0;
        writer.write_record(&sam).unwrap();

        assert_eq!(written(writer), "r1\t0\tchr1\t10\t0\t4M\t*\t0\t0\tACGT\t*\n");
    }

    #[test]
    fn test_command_line_made_printable() {
        assert_eq!(header_value("mas-to-sam\treads.mas\n"), "mas-to-sam reads.mas ");
        assert_eq!(header_value("mas-to-sam reads\u{fffd}.mas"), "mas-to-sam reads?.mas");

        let mut program = ProgramRecord::default();
        program.command_line = Some("mas-to-sam r\u{e9}ads.mas".to_string());
        let header = build_header(&SamHeader {
            contigs: Vec::new(),
            program,
        })
        .unwrap();

        let mut writer = sam::io::Writer::new(Vec::new());
        writer.write_header(&header).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.ends_with("\tCL:mas-to-sam r?ads.mas\n"));
    }

    #[test]
    fn test_zero_length_contig_rejected() {
        let header = SamHeader {
            contigs: vec![Contig::new("chr1", 0)],
            program: ProgramRecord::default(),
        };
        let err = build_header(&header).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_default_program_record() {
        let program = ProgramRecord::default();
        assert_eq!(program.id, "mas-to-sam");
        assert_eq!(program.version, env!("CARGO_PKG_VERSION"));
        assert!(program.command_line.is_none());
    }
}
