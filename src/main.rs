use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod cmd;
mod config;
mod error;
mod process;
mod toolchain;
mod utils;

use cmd::CommandName;
use error::TeaseError;
use process::ProcessRunner;
use utils::output::{Color, color};

/// tease - one front end for a project's developer tools
///
/// Command layout:
///   tease build [--no-clean]
///   tease lint [--filter-paths] [PATH ...]
///   tease check
///   tease format [PATH ...]
///   tease specs [--watch] [--ci[=BOOL]] [--update-snapshot] [PATH ...]
///   tease test                 (check + specs --ci + build --no-clean)
///   tease pre-commit
///   tease install
///
/// Global flags (before the command):
///   -v / -vv        Increase verbosity
///   -q / --quiet    Errors only
///   -C / --cwd      Start settings discovery here instead of the current directory
///   -c / --config   Use this settings file, skip discovery
///
/// Settings:
///   tease.yaml | tease.yml | tease.json | .tease.json | package.json ("tease" key),
///   searched from the start directory upwards. Its directory is where every tool runs.
#[derive(Parser, Debug)]
#[command(
    name = "tease",
    version,
    author,
    about = "tease - one front end for a project's compiler, linter, formatter, test runner and git hooks",
    after_help = CommandName::help_listing()
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Directory to start settings discovery from
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Settings file to use instead of discovery
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Command to run, followed by its own flags and paths (passed through untouched)
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    argv: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    if let Err(err) = run(cli) {
        let tease_err = err.downcast_ref::<TeaseError>();
        if let Some(TeaseError::Usage(usage)) = tease_err {
            usage.exit();
        }
        let code = tease_err.map(TeaseError::exit_code).unwrap_or(1);
        log_error!("{}", color(Color::Red, format!("{err:#}")));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Start directory (CLI flag > process cwd)
    let start = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    // Handlers are async; processes still run one at a time.
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(cmd::dispatch(
        &cli.argv,
        &start,
        cli.config.as_deref(),
        &ProcessRunner,
    ))?;
    Ok(())
}
