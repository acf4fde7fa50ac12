use clap::Parser;
use tracing_subscriber::EnvFilter;

use mas_to_sam::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag; stdout is reserved for records
    let filter = if cli.verbose {
        EnvFilter::new("mas_to_sam=debug,info")
    } else {
        EnvFilter::new("mas_to_sam=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::convert::run(&cli)
}
