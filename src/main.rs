use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use kannada_dict::config::Config;
use kannada_dict::convert_file;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert the Kannada dictionary from YAML to a SQLite database.
#[derive(Parser, Debug)]
#[command(
    name = "convert",
    version,
    after_help = "Example: convert kannada_dictionary.yaml public/kannada-dictionary.db"
)]
struct Cli {
    /// Source YAML file
    input: PathBuf,

    /// Destination database (replaced if it exists)
    output: PathBuf,

    /// JSON file with conversion settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            println!("❌ Conversion failed!");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.no_progress {
        config.progress = false;
    }

    let summary = convert_file(&cli.input, &cli.output, &config).with_context(|| {
        format!(
            "failed to convert {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    println!("{summary}");
    println!();
    println!("🎉 Conversion completed! Database ready for use.");
    println!("📁 Database location: {}", absolute(&cli.output).display());

    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
