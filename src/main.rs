//! Command line entry point invoked by the host build tool during the prepare phase.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use universal_links::{Platform, PrepareBuilder};

#[derive(Debug, Parser)]
#[command(name = "universal-links", version, about)]
struct Cli {
  /// Enable debug logging.
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Generate platform artifacts from the `<universal-links>` declaration.
  Prepare(PrepareArgs),
  /// Print the normalised declaration as JSON.
  Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct PrepareArgs {
  /// Root of the Cordova project.
  #[arg(long, default_value = ".")]
  project_root: PathBuf,

  /// Platforms to prepare.
  #[arg(long = "platform", value_enum, required = true)]
  platforms: Vec<Platform>,
}

#[derive(Debug, Args)]
struct InspectArgs {
  /// Root of the Cordova project.
  #[arg(long, default_value = ".")]
  project_root: PathBuf,
}

fn main() {
  if let Err(e) = run() {
    eprintln!("error: {:#}", e);
    std::process::exit(1);
  }
}

fn run() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("universal_links=debug")
  } else {
    EnvFilter::new("universal_links=info")
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .without_time()
    .with_writer(std::io::stderr)
    .init();

  match cli.command {
    Commands::Prepare(args) => {
      let report = PrepareBuilder::discover(args.project_root).build(&args.platforms)?;
      for path in &report.written {
        tracing::info!("Wrote {}", path.display());
      }
      Ok(())
    }
    Commands::Inspect(args) => {
      let extraction = PrepareBuilder::discover(args.project_root).inspect()?;
      println!("{}", serde_json::to_string_pretty(&extraction.links)?);
      Ok(())
    }
  }
}
