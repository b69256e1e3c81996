mod commands;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use gpxrank::ScanOptions;
use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gpxrank",
    about = "A CLI tool for ranking running and walking GPX tracks by distance and pace"
)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Load every track file in a directory and print the walking and running rankings")]
    Rank {
        #[arg(default_value = ".", help = "Directory containing the track files")]
        dir: PathBuf,
        #[arg(long, default_value = "gpx", help = "Extension of the files to load")]
        extension: String,
        #[arg(long, help = "Print a detail line per loaded file instead of a progress dot")]
        details: bool,
    },
    #[command(about = "Print the measurements of a single track file")]
    Show {
        #[arg(help = "Track file to measure")]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Rank {
            dir,
            extension,
            details,
        } => commands::rank::rank_command(&dir, &ScanOptions { extension, details })?,
        Commands::Show { file } => commands::show::show_command(&file)?,
    }
    Ok(())
}
