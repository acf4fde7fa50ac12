use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::contig::Contig;
use crate::core::dictionary::SequenceDictionary;
use crate::utils::validation::{check_contig_limit, normalize_md5};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence dictionary: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}

/// Read the sequence dictionary from the header of a SAM/BAM/CRAM file.
///
/// `.bam` and `.cram` select the binary readers; anything else is read as SAM.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no contigs are found, or
/// `ParseError::TooManyContigs` if the limit is exceeded.
pub fn parse_file(path: &Path) -> Result<SequenceDictionary, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("bam") => parse_bam_file(path),
        Some("cram") => parse_cram_file(path),
        _ => parse_sam_file(path),
    }
}

/// Parse a SAM file (text format)
fn parse_sam_file(path: &Path) -> Result<SequenceDictionary, ParseError> {
    use noodles::sam;

    let mut reader = std::fs::File::open(path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    header_to_dictionary(&header, path)
}

/// Parse a BAM file (binary format)
fn parse_bam_file(path: &Path) -> Result<SequenceDictionary, ParseError> {
    use noodles::bam;

    let mut reader = std::fs::File::open(path).map(bam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    header_to_dictionary(&header, path)
}

/// Parse a CRAM file
fn parse_cram_file(path: &Path) -> Result<SequenceDictionary, ParseError> {
    use noodles::cram;

    let mut reader = std::fs::File::open(path).map(cram::io::Reader::new)?;

    reader
        .read_file_definition()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    let header = reader
        .read_file_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    header_to_dictionary(&header, path)
}

/// Convert a noodles header into a `SequenceDictionary`
fn header_to_dictionary(
    header: &noodles::sam::Header,
    source: &Path,
) -> Result<SequenceDictionary, ParseError> {
    use noodles::sam::header::record::value::map::tag::Other;

    let mut contigs = Vec::new();

    for (name, map) in header.reference_sequences() {
        if check_contig_limit(contigs.len()).is_some() {
            return Err(ParseError::TooManyContigs(contigs.len()));
        }

        let mut contig = Contig::new(name.to_string(), map.length().get() as u64);
        let other = map.other_fields();

        if let Ok(m5_tag) = Other::try_from(*b"M5") {
            if let Some(md5_value) = other.get(&m5_tag) {
                contig.md5 = checked_md5(&contig.name, &md5_value.to_string());
            }
        }

        if let Ok(as_tag) = Other::try_from(*b"AS") {
            contig.assembly = other.get(&as_tag).map(ToString::to_string);
        }

        if let Ok(ur_tag) = Other::try_from(*b"UR") {
            contig.uri = other.get(&ur_tag).map(ToString::to_string);
        }

        if let Ok(sp_tag) = Other::try_from(*b"SP") {
            contig.species = other.get(&sp_tag).map(ToString::to_string);
        }

        if let Ok(an_tag) = Other::try_from(*b"AN") {
            if let Some(aliases_value) = other.get(&an_tag) {
                contig.aliases = split_aliases(&aliases_value.to_string());
            }
        }

        contigs.push(contig);
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "No @SQ lines found in {}",
            source.display()
        )));
    }

    Ok(SequenceDictionary::new(contigs).with_source(source.display().to_string()))
}

/// Validate and normalize an M5 value, warning about and dropping bad ones
fn checked_md5(contig: &str, raw: &str) -> Option<String> {
    let normalized = normalize_md5(raw);
    if normalized.is_none() {
        warn!(
            contig = %contig,
            md5 = %raw,
            "Invalid MD5 checksum format, ignoring"
        );
    }
    normalized
}

fn split_aliases(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `@SQ` lines from raw SAM header text
///
/// Lines other than `@SQ` are ignored, as are `@SQ` lines missing `SN` or `LN`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if no usable `@SQ` lines are found, or
/// `ParseError::TooManyContigs` if the limit is exceeded.
pub fn parse_header_text(text: &str) -> Result<SequenceDictionary, ParseError> {
    let mut contigs = Vec::new();

    for line in text.lines() {
        if !line.starts_with("@SQ") {
            continue;
        }

        let mut name: Option<String> = None;
        let mut length: Option<u64> = None;
        let mut md5_raw: Option<String> = None;
        let mut assembly: Option<String> = None;
        let mut uri: Option<String> = None;
        let mut species: Option<String> = None;
        let mut aliases: Vec<String> = Vec::new();

        for field in line.split('\t').skip(1) {
            if let Some((tag, value)) = field.split_once(':') {
                match tag {
                    "SN" => name = Some(value.to_string()),
                    "LN" => length = value.parse().ok(),
                    "M5" => md5_raw = Some(value.to_string()),
                    "AS" => assembly = Some(value.to_string()),
                    "UR" => uri = Some(value.to_string()),
                    "SP" => species = Some(value.to_string()),
                    "AN" => aliases = split_aliases(value),
                    _ => {}
                }
            }
        }

        let (Some(name), Some(length)) = (name, length) else {
            warn!(line = %line, "Skipping @SQ line without SN and LN");
            continue;
        };

        if check_contig_limit(contigs.len()).is_some() {
            return Err(ParseError::TooManyContigs(contigs.len()));
        }

        let mut contig = Contig::new(name, length);
        contig.md5 = md5_raw.and_then(|raw| checked_md5(&contig.name, &raw));
        contig.assembly = assembly;
        contig.uri = uri;
        contig.species = species;
        contig.aliases = aliases;
        contigs.push(contig);
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No @SQ lines found in header".to_string(),
        ));
    }

    Ok(SequenceDictionary::new(contigs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_text() {
        let header = r"@HD	VN:1.6	SO:coordinate
@SQ	SN:chr1	LN:248956422	M5:6AEF897C3D6FF0C78AFF06AC189178DD
@SQ	SN:chr2	LN:242193529	M5:f98db672eb0993dcfdabafe2a882905c
@SQ	SN:chrM	LN:16569
@RG	ID:sample1
";

        let dictionary = parse_header_text(header).unwrap();
        assert_eq!(dictionary.len(), 3);

        assert_eq!(dictionary.contigs[0].name, "chr1");
        assert_eq!(dictionary.contigs[0].length, 248_956_422);
        assert_eq!(
            dictionary.contigs[0].md5,
            Some("6aef897c3d6ff0c78aff06ac189178dd".to_string())
        );

        assert_eq!(dictionary.contigs[1].name, "chr2");
        assert_eq!(dictionary.contigs[2].name, "chrM");
        assert!(dictionary.contigs[2].md5.is_none());
    }

    #[test]
    fn test_parse_header_text_no_sq() {
        let header = "@HD\tVN:1.6\n@RG\tID:sample1\n";
        assert!(matches!(
            parse_header_text(header),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_header_text_skips_incomplete_sq() {
        let header = "@SQ\tSN:chr1\n@SQ\tLN:100\n@SQ\tSN:chr2\tLN:200\n";
        let dictionary = parse_header_text(header).unwrap();
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.contigs[0].name, "chr2");
    }

    #[test]
    fn test_parse_header_text_invalid_md5_dropped() {
        let header = "@SQ\tSN:chr1\tLN:100\tM5:not-an-md5\n";
        let dictionary = parse_header_text(header).unwrap();
        assert!(dictionary.contigs[0].md5.is_none());
    }

    #[test]
    fn test_parse_header_text_with_aliases() {
        let header = r"@HD	VN:1.6
@SQ	SN:chr1	LN:248956422	AN:1,NC_000001.11
@SQ	SN:chrM	LN:16569	AN:MT, chrMT ,
";

        let dictionary = parse_header_text(header).unwrap();
        assert_eq!(
            dictionary.contigs[0].aliases,
            vec!["1".to_string(), "NC_000001.11".to_string()]
        );
        assert_eq!(
            dictionary.contigs[1].aliases,
            vec!["MT".to_string(), "chrMT".to_string()]
        );
        assert_eq!(dictionary.get("MT").map(|c| c.length), Some(16569));
    }

    #[test]
    fn test_parse_file_sam_header() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".sam").tempfile().unwrap();
        write!(
            file,
            "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:1000\tM5:6aef897c3d6ff0c78aff06ac189178dd\tAN:1\n"
        )
        .unwrap();

        let dictionary = parse_file(file.path()).unwrap();
        assert_eq!(dictionary.len(), 1);
        assert_eq!(
            dictionary.contigs[0].md5.as_deref(),
            Some("6aef897c3d6ff0c78aff06ac189178dd")
        );
        assert_eq!(dictionary.get("1").map(|c| c.name.as_str()), Some("chr1"));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("/nonexistent/reads.bam"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
