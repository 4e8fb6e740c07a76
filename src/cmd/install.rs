/*!
`install.rs`

Implements `tease install`: point git at the hook scripts in `.husky`.
Does nothing on CI machines, where hooks are never wanted.
*/

use clap::Parser;

use super::command::CommandName;
use super::shared::parse_args;
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::log_info;
use crate::process::Runner;
use crate::toolchain::{HOOKS_DIR, Tool};
use crate::utils::env::is_ci;
use crate::utils::output::{Color, color};

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Install git hooks (skipped in CI)")]
pub struct InstallArgs {}

pub async fn execute_install(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let _: InstallArgs = parse_args(CommandName::Install, args)?;
    install(is_ci(), config, runner).await
}

pub async fn install(ci: bool, config: &Config, runner: &dyn Runner) -> Result<(), TeaseError> {
    if ci {
        log_info!(
            "{}",
            color(Color::Yellow, "CI environment detected; skipping git hooks")
        );
        return Ok(());
    }
    runner
        .run(Tool::Hooks.request(build_args!("install", HOOKS_DIR), config))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;

    #[tokio::test]
    async fn skipped_in_ci() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::new();
        install(true, &config, &runner).await.unwrap();
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn installs_hooks_locally() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::new();
        install(false, &config, &runner).await.unwrap();
        let calls = runner.calls();
        assert_eq!(calls[0].name, "hooks");
        assert_eq!(calls[0].args, vec!["install", HOOKS_DIR]);
    }
}
