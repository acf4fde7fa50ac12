use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::convert::{ConvertOptions, Converter};
use crate::core::types::PositionBase;
use crate::output::json::JsonLinesWriter;
use crate::output::sam::SamWriter;
use crate::output::{ProgramRecord, RecordWriter};
use crate::parsing;
use crate::parsing::mas::{self, MasReader};

/// Execute the conversion
///
/// # Errors
///
/// Returns an error if the input, output, or dictionary cannot be opened, if
/// writing fails, or if an invalid line is found under `--on-invalid fail`.
pub fn run(args: &Cli) -> anyhow::Result<()> {
    debug!(?args, "Parsed arguments");

    let dictionary = args
        .dict
        .as_ref()
        .map(|path| {
            parsing::parse_dictionary(path).with_context(|| {
                format!("Failed to load sequence dictionary {}", path.display())
            })
        })
        .transpose()?;

    if let Some(dictionary) = &dictionary {
        info!(
            contigs = dictionary.len(),
            bases = dictionary.total_length(),
            "Loaded sequence dictionary"
        );
    }

    let position_base = if args.zero_based {
        PositionBase::ZeroBased
    } else {
        PositionBase::OneBased
    };

    let options = ConvertOptions {
        position_base,
        invalid_lines: args.on_invalid,
        mapq: args.mapq,
        uppercase: args.uppercase,
        dictionary,
        program: ProgramRecord::default().with_command_line(command_line()),
    };

    let input = mas::open_input(&args.mas)
        .with_context(|| format!("Failed to open MAS input {}", args.mas.display()))?;
    let reader = MasReader::new(input, position_base);

    let mut writer = open_writer(args)?;

    let summary = Converter::new(options)
        .run(reader, &mut writer)
        .with_context(|| format!("Failed to convert {}", args.mas.display()))?;

    if args.summary {
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn open_writer(args: &Cli) -> anyhow::Result<Box<dyn RecordWriter>> {
    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let writer: Box<dyn RecordWriter> = match args.format {
        OutputFormat::Sam => {
            let writer = SamWriter::new(output);
            if args.no_header {
                Box::new(writer.without_header())
            } else {
                Box::new(writer)
            }
        }
        OutputFormat::Json => Box::new(JsonLinesWriter::new(output)),
    };

    Ok(writer)
}

fn command_line() -> String {
    std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
