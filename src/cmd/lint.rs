/*!
`lint.rs`

Implements `tease lint [--filter-paths] [PATHS...]`: run the linter with
auto-fix over the given paths, or over every source directory when none are
given. `--filter-paths` drops paths outside the configured source
directories (handy when a hook hands over every staged file).
*/

use clap::Parser;

use super::command::CommandName;
use super::shared::{filter_paths, parse_args};
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::log_info;
use crate::process::Runner;
use crate::toolchain::{LINTER_CONFIG, Tool};

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Lint and auto-fix sources")]
pub struct LintArgs {
    /// Files or globs to lint (default: every source directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Only lint the given paths that lie inside a source directory
    #[arg(long = "filter-paths")]
    pub filter_paths: bool,
}

pub async fn execute_lint(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let opts: LintArgs = parse_args(CommandName::Lint, args)?;
    lint(&opts, config, runner).await
}

pub async fn lint(opts: &LintArgs, config: &Config, runner: &dyn Runner) -> Result<(), TeaseError> {
    let targets = filter_paths(&opts.paths, opts.filter_paths, config);
    if targets.is_empty() {
        log_info!("No paths inside the source directories; nothing to lint");
        return Ok(());
    }
    let args = build_args!("--config", LINTER_CONFIG, "--fix", targets);
    runner.run(Tool::Linter.request(args, config)).await
}
