/*!
`specs.rs`

Implements `tease specs [--watch] [--ci[=BOOL]] [--update-snapshot] [PATHS...]`.

The test runner always gets coverage and one `--roots` pair per source
directory. `--ci` is always passed explicitly as `--ci=true|false`; when the
flag is not given it follows the ambient CI detection (`utils::env::is_ci`).
*/

use clap::Parser;

use super::command::CommandName;
use super::shared::{flag, parse_args};
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::process::Runner;
use crate::toolchain::{TEST_RUNNER_CONFIG, Tool};
use crate::utils::env::is_ci;

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Run the test runner with coverage")]
pub struct SpecsArgs {
    /// Test files or patterns forwarded to the test runner
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Re-run tests when files change
    #[arg(long)]
    pub watch: bool,

    /// Run in CI mode (default: detected from the environment)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ci: Option<bool>,

    /// Re-record every snapshot that fails
    #[arg(long = "update-snapshot")]
    pub update_snapshot: bool,
}

pub async fn execute_specs(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let opts: SpecsArgs = parse_args(CommandName::Specs, args)?;
    specs(&opts, config, runner).await
}

pub async fn specs(opts: &SpecsArgs, config: &Config, runner: &dyn Runner) -> Result<(), TeaseError> {
    let args = specs_args(opts, is_ci(), config);
    runner.run(Tool::TestRunner.request(args, config)).await
}

/// Test runner arguments; `ambient_ci` is used only when `--ci` was not given.
pub fn specs_args(opts: &SpecsArgs, ambient_ci: bool, config: &Config) -> Vec<String> {
    let ci = opts.ci.unwrap_or(ambient_ci);
    let roots: Vec<String> = config
        .src
        .iter()
        .flat_map(|dir| ["--roots".to_string(), dir.clone()])
        .collect();
    build_args!(
        "--config",
        TEST_RUNNER_CONFIG,
        "--coverage",
        roots,
        format!("--ci={ci}"),
        flag(opts.watch, "--watch"),
        flag(opts.update_snapshot, "--updateSnapshot"),
        &opts.paths,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::RecordingRunner;

    fn parse(args: &[&str]) -> SpecsArgs {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(CommandName::Specs, &args).unwrap()
    }

    #[test]
    fn ci_follows_environment_unless_given() {
        let config = Config::defaults("/repo");
        let outside = specs_args(&parse(&[]), false, &config);
        assert!(outside.contains(&"--ci=false".to_string()));

        let inside = specs_args(&parse(&[]), true, &config);
        assert!(inside.contains(&"--ci=true".to_string()));

        let forced = specs_args(&parse(&["--ci"]), false, &config);
        assert!(forced.contains(&"--ci=true".to_string()));

        let disabled = specs_args(&parse(&["--ci=false"]), true, &config);
        assert!(disabled.contains(&"--ci=false".to_string()));
    }

    #[test]
    fn roots_per_source_dir_and_flags() {
        let mut config = Config::defaults("/repo");
        config.src = vec!["src".into(), "lib".into()];
        let args = specs_args(
            &parse(&["--watch", "--update-snapshot", "src/a.test.ts"]),
            false,
            &config,
        );
        assert_eq!(
            args,
            vec![
                "--config",
                TEST_RUNNER_CONFIG,
                "--coverage",
                "--roots",
                "src",
                "--roots",
                "lib",
                "--ci=false",
                "--watch",
                "--updateSnapshot",
                "src/a.test.ts"
            ]
        );
    }

    #[tokio::test]
    async fn explicit_ci_reaches_the_runner() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::new();
        execute_specs(&["--ci".to_string()], &config, &runner)
            .await
            .unwrap();
        let calls = runner.calls();
        assert_eq!(calls[0].name, "test-runner");
        assert!(calls[0].args.contains(&"--ci=true".to_string()));
    }
}
