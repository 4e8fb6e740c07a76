/*!
`build.rs`

Implements `tease build [--no-clean]`.

Steps:
  1. Unless `--no-clean`: remove every `dist` directory plus the compiler's
     incremental cache for each build descriptor (`tsconfig.json` ->
     `tsconfig.tsbuildinfo`) in a single cleaner run.
  2. Run the compiler once per build descriptor, in configured order.

With `--no-clean` stale caches are left alone, including caches of
descriptors that were since removed from the settings.
*/

use std::path::Path;

use clap::Parser;

use super::command::CommandName;
use super::shared::parse_args;
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::log_debug;
use crate::process::Runner;
use crate::toolchain::{BUILD_CACHE_EXT, Tool};

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Clean outputs, then compile every build descriptor")]
pub struct BuildArgs {
    /// Keep previous outputs and incremental caches
    #[arg(long = "no-clean")]
    pub no_clean: bool,
}

pub async fn execute_build(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let opts: BuildArgs = parse_args(CommandName::Build, args)?;
    build(&opts, config, runner).await
}

pub async fn build(
    opts: &BuildArgs,
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    if opts.no_clean {
        log_debug!("--no-clean: keeping previous outputs");
    } else {
        runner
            .run(Tool::Cleaner.request(clean_targets(config), config))
            .await?;
    }

    for project in &config.project {
        runner
            .run(Tool::Compiler.request(build_args!("--project", project), config))
            .await?;
    }
    Ok(())
}

/// Output directories followed by one cache file per build descriptor.
pub fn clean_targets(config: &Config) -> Vec<String> {
    config
        .dist
        .iter()
        .cloned()
        .chain(config.project.iter().map(|p| build_cache_path(p)))
        .collect()
}

/// Path of the incremental build cache the compiler writes for `project`.
pub fn build_cache_path(project: &str) -> String {
    Path::new(project)
        .with_extension(BUILD_CACHE_EXT)
        .to_string_lossy()
        .into_owned()
}
