/*!
Command dispatcher.

`dispatch` resolves the project settings once, looks the command name up in
the closed `CommandName` table and hands the remaining arguments to that
command's handler. Unknown names fail before any process is spawned.

Layout:
  src/cmd/
    mod.rs          (this file: dispatch + run_command)
    command.rs      (CommandName table)
    shared.rs       (build_args!, filter_paths, default globs, parse_args)
    build.rs  check.rs  format.rs  install.rs
    lint.rs   pre_commit.rs  specs.rs  test.rs

Conventions:
  - Each command module exposes one public `execute_*` function taking
    (remaining args, &Config, &dyn Runner) and returning `Result<(), TeaseError>`.
  - Flag structs derive `clap::Parser` and are parsed with `shared::parse_args`.
  - Handlers never catch runner errors.
*/

pub mod build;
pub mod check;
pub mod command;
pub mod format;
pub mod install;
pub mod lint;
pub mod pre_commit;
pub mod shared;
pub mod specs;

use std::path::Path;

pub use command::CommandName;

use crate::config::Config;
use crate::error::TeaseError;
use crate::log_debug;
use crate::process::Runner;

/// Run `argv[0]` with `argv[1..]` as its arguments.
///
/// Settings come from `settings` when given, otherwise from discovery starting
/// at `start_dir`.
pub async fn dispatch(
    argv: &[String],
    start_dir: &Path,
    settings: Option<&Path>,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let config = match settings {
        Some(path) => Config::load_file(path)?,
        None => Config::resolve(start_dir)?,
    };
    log_debug!(
        "settings={} cwd={} src={:?} dist={:?} project={:?}",
        config
            .source
            .as_deref()
            .map_or_else(|| "<defaults>".into(), |p| p.display().to_string()),
        config.cwd.display(),
        config.src,
        config.dist,
        config.project
    );

    let (name, rest) = argv
        .split_first()
        .ok_or_else(|| TeaseError::unknown_command(""))?;
    let command: CommandName = name.parse()?;
    run_command(command, rest, &config, runner).await
}

/// Invoke the handler bound to `command`.
pub async fn run_command(
    command: CommandName,
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    match command {
        CommandName::Build => build::execute_build(args, config, runner).await,
        CommandName::PreCommit => pre_commit::execute_pre_commit(args, config, runner).await,
        CommandName::Format => format::execute_format(args, config, runner).await,
        CommandName::Specs => specs::execute_specs(args, config, runner).await,
        CommandName::Test => test::execute_test(args, config, runner).await,
        CommandName::Lint => lint::execute_lint(args, config, runner).await,
        CommandName::Check => check::execute_check(args, config, runner).await,
        CommandName::Install => install::execute_install(args, config, runner).await,
    }
}
