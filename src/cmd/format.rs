/*!
`format.rs`

Implements `tease format [PATHS...]`: rewrite files in place with the
formatter. Without paths the top-level glob plus one glob per source
directory is used.
*/

use clap::Parser;

use super::command::CommandName;
use super::shared::{default_format_globs, parse_args};
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::process::Runner;
use crate::toolchain::Tool;

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Rewrite files with the formatter")]
pub struct FormatArgs {
    /// Files or globs to format (default: top-level files and source directories)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}

pub async fn execute_format(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let opts: FormatArgs = parse_args(CommandName::Format, args)?;
    format(&opts, config, runner).await
}

pub async fn format(
    opts: &FormatArgs,
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let paths = if opts.paths.is_empty() {
        default_format_globs(config)
    } else {
        opts.paths.clone()
    };
    runner
        .run(Tool::Formatter.request(build_args!("--write", paths), config))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::shared::TOP_LEVEL_FORMAT_GLOB;
    use crate::process::testing::RecordingRunner;

    #[tokio::test]
    async fn default_globs() {
        let mut config = Config::defaults("/repo");
        config.src = vec!["src".into(), "test".into()];
        let runner = RecordingRunner::new();
        execute_format(&[], &config, &runner).await.unwrap();
        assert_eq!(
            runner.calls()[0].args,
            vec![
                "--write",
                TOP_LEVEL_FORMAT_GLOB,
                "src/**/*.{js,jsx,ts,tsx,json,md}",
                "test/**/*.{js,jsx,ts,tsx,json,md}"
            ]
        );
    }

    #[tokio::test]
    async fn explicit_paths_replace_defaults() {
        let config = Config::defaults("/repo");
        let runner = RecordingRunner::new();
        execute_format(&["README.md".to_string(), "src/a.ts".to_string()], &config, &runner)
            .await
            .unwrap();
        assert_eq!(runner.calls()[0].args, vec!["--write", "README.md", "src/a.ts"]);
    }
}
