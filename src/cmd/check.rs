/*!
`check.rs`

Implements `tease check`: lint the whole source tree without fixing, then
verify formatting without writing. Both must pass; the formatter does not
run if the linter fails.
*/

use clap::Parser;

use super::command::CommandName;
use super::shared::{default_format_globs, default_source_globs, parse_args};
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::process::Runner;
use crate::toolchain::{LINTER_CONFIG, Tool};

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Lint and verify formatting without changing files")]
pub struct CheckArgs {}

pub async fn execute_check(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let _: CheckArgs = parse_args(CommandName::Check, args)?;
    check(config, runner).await
}

pub async fn check(config: &Config, runner: &dyn Runner) -> Result<(), TeaseError> {
    let lint = build_args!("--config", LINTER_CONFIG, default_source_globs(config));
    runner.run(Tool::Linter.request(lint, config)).await?;

    let verify = build_args!("--check", default_format_globs(config));
    runner.run(Tool::Formatter.request(verify, config)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;

    #[tokio::test]
    async fn lints_then_verifies_formatting() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::new();
        execute_check(&[], &config, &runner).await.unwrap();

        let calls = runner.calls();
        assert_eq!(runner.names(), vec!["linter", "formatter"]);
        assert!(!calls[0].args.iter().any(|a| a == "--fix"));
        assert_eq!(calls[0].args.last().unwrap(), "src/**/*.{js,jsx,ts,tsx}");
        assert_eq!(calls[1].args[0], "--check");
        assert!(!calls[1].args.iter().any(|a| a == "--write"));
    }

    #[tokio::test]
    async fn lint_failure_skips_formatter() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::failing("linter", 1);
        assert!(check(&config, &runner).await.is_err());
        assert_eq!(runner.names(), vec!["linter"]);
    }

    #[tokio::test]
    async fn rejects_stray_arguments() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::new();
        let err = execute_check(&["src".to_string()], &config, &runner)
            .await
            .unwrap_err();
        assert!(matches!(err, TeaseError::Usage(_)));
    }
}
