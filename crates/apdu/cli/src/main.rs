//! Command-line tool for decoding and encoding ISO/IEC 7816-4 APDUs

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;

use commands::{Commands, EncodingMode};

#[derive(Parser)]
#[command(version, about = "Decode and encode ISO/IEC 7816-4 APDUs")]
struct Cli {
    /// Debug level output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::ParseCommand { hex } => commands::parse_command(&hex.join(""))?,
        Commands::ParseResponse { hex } => commands::parse_response(&hex.join(""))?,
        Commands::EncodeCommand {
            cla,
            ins,
            p1,
            p2,
            data,
            ne,
            extended,
        } => commands::encode_command(
            [cla, ins, p1, p2],
            data.as_deref(),
            ne,
            EncodingMode::from_flag(extended),
        )?,
        Commands::EncodeResponse { data, sw } => commands::encode_response(data.as_deref(), sw)?,
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, &directives))
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` style directives on top of a default level raised by `--verbose`
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}
