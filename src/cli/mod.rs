//! Command-line interface for mas-to-sam.
//!
//! There is a single command: convert one MAS file into Simple-SAM.
//!
//! ## Usage
//!
//! ```text
//! # Convert a file, SAM on stdout
//! mas-to-sam reads.mas > reads.sam
//!
//! # Read from stdin (gzip is detected automatically)
//! zcat reads.mas.gz | mas-to-sam - -o reads.sam
//!
//! # Add @SQ lines and check coordinates against a reference dictionary
//! mas-to-sam reads.mas --dict hg38.dict
//!
//! # Keep going past malformed lines
//! mas-to-sam reads.mas --on-invalid warn --summary
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::core::record::MAPQ_UNAVAILABLE;
use crate::core::types::InvalidLineHandling;

pub mod convert;

#[derive(Parser, Debug)]
#[command(name = "mas-to-sam")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "To Simple-SAM converter")]
#[command(
    long_about = "mas-to-sam converts tab-delimited MAS alignments into Simple-SAM.\n\nEach MAS line holds four tab-separated fields: chromosome, read name, read string and position. Each becomes one SAM alignment line with the 11 mandatory columns, preceded by an @HD/@SQ/@PG header."
)]
pub struct Cli {
    /// Input MAS file. Use '-' for stdin. Gzip input is detected automatically
    #[arg(value_name = "MAS")]
    pub mas: PathBuf,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "sam")]
    pub format: OutputFormat,

    /// Sequence dictionary (SAM/BAM/CRAM header, .dict, or .fai) used for
    /// @SQ header lines and to validate record coordinates
    #[arg(short, long, value_name = "PATH")]
    pub dict: Option<PathBuf>,

    /// MAS positions are 0-based (they are written 1-based)
    #[arg(long)]
    pub zero_based: bool,

    /// Mapping quality written to every record (255 = unavailable)
    #[arg(long, default_value_t = MAPQ_UNAVAILABLE)]
    pub mapq: u8,

    /// Upper-case read strings
    #[arg(long)]
    pub uppercase: bool,

    /// Omit the SAM header
    #[arg(long)]
    pub no_header: bool,

    /// How to handle lines that cannot be converted
    #[arg(long, value_enum, default_value = "fail")]
    pub on_invalid: InvalidLineHandling,

    /// Print a JSON conversion summary to stderr when done
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Simple-SAM text
    Sam,
    /// One JSON object per record
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mas-to-sam", "reads.mas"]).unwrap();
        assert_eq!(cli.mas, PathBuf::from("reads.mas"));
        assert_eq!(cli.format, OutputFormat::Sam);
        assert_eq!(cli.mapq, 255);
        assert_eq!(cli.on_invalid, InvalidLineHandling::Fail);
        assert!(!cli.zero_based);
        assert!(cli.dict.is_none());
    }

    #[test]
    fn test_requires_input() {
        assert!(Cli::try_parse_from(["mas-to-sam"]).is_err());
    }

    #[test]
    fn test_rejects_second_positional() {
        assert!(Cli::try_parse_from(["mas-to-sam", "a.mas", "b.mas"]).is_err());
    }

    #[test]
    fn test_mapq_range() {
        assert!(Cli::try_parse_from(["mas-to-sam", "a.mas", "--mapq", "60"]).is_ok());
        assert!(Cli::try_parse_from(["mas-to-sam", "a.mas", "--mapq", "256"]).is_err());
    }

    #[test]
    fn test_stdin_and_options() {
        let cli = Cli::try_parse_from([
            "mas-to-sam",
            "-",
            "--format",
            "json",
            "--on-invalid",
            "warn",
            "--zero-based",
        ])
        .unwrap();
        assert_eq!(cli.mas, PathBuf::from("-"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.on_invalid, InvalidLineHandling::Warn);
        assert!(cli.zero_based);
    }
}
