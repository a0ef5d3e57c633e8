//! CLI module containing the main entry point logic.

use crate::config;
use crate::document::ScriptDocument;
use crate::os_family::OsFamily;
use anyhow::{Context, anyhow};
use clap::Parser as ClapParser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding a `tracing` filter directive
const LOG_ENV_VAR: &str = "SCRIPTBUILDER_LOG";

/// CLI arguments for the scriptbuilder tool.
#[derive(ClapParser)]
#[command(name = "scriptbuilder")]
#[command(version = PKG_VERSION)]
#[command(about = "Render a JSON script document as a shell script or batch file", long_about = None)]
struct Cli {
    /// Script document to render (defaults to the nearest Scriptfile.json)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Target dialect (defaults to $SCRIPTBUILDER_OS, then the host platform)
    #[arg(long = "os", value_enum, value_name = "FAMILY")]
    os: Option<OsFamily>,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Directory containing the Scriptfile (alias: --scriptfile)
    #[arg(long = "working-dir", alias = "scriptfile", value_name = "PATH")]
    working_dir: Option<PathBuf>,

    /// Log rendering decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Main CLI logic.
pub fn run_cli() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(ref dir) = cli.working_dir {
        config::set_custom_scriptfile_path(Some(dir.clone()));
    }

    if let Err(err) = render_document(&cli) {
        crate::fatal_error(&format!("Error: {err:#}"));
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn render_document(cli: &Cli) -> anyhow::Result<()> {
    let (path, source) = match &cli.file {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.clone(), source)
        }
        None => config::load_scriptfile().map_err(|err| anyhow!("{err}"))?,
    };
    let family = cli.os.unwrap_or_else(config::default_family);
    tracing::debug!(path = %path.display(), %family, "rendering document");

    let document = ScriptDocument::parse(&source)
        .map_err(|err| anyhow!("{}: {err}", path.display()))?;
    let builder = document
        .into_builder()
        .map_err(|err| anyhow!("{}: {err}", path.display()))?;
    let script = builder
        .render(family)
        .with_context(|| format!("cannot render {} for {family}", path.display()))?;

    match &cli.output {
        Some(output) => {
            fs::write(output, &script)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::debug!(output = %output.display(), bytes = script.len(), "wrote script");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(script.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
