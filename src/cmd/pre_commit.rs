/*!
`pre_commit.rs`

Implements `tease pre-commit`: hand the staged files to the staged-file
fixer using the fixed `.lintstagedrc.json` configuration. Usually invoked
from the git hook installed by `tease install`.
*/

use clap::Parser;

use super::command::CommandName;
use super::shared::parse_args;
use crate::build_args;
use crate::config::Config;
use crate::error::TeaseError;
use crate::process::Runner;
use crate::toolchain::{STAGED_CONFIG, Tool};

#[derive(Parser, Debug, Default, Clone)]
#[command(about = "Auto-fix staged files")]
pub struct PreCommitArgs {}

pub async fn execute_pre_commit(
    args: &[String],
    config: &Config,
    runner: &dyn Runner,
) -> Result<(), TeaseError> {
    let _: PreCommitArgs = parse_args(CommandName::PreCommit, args)?;
    runner
        .run(Tool::Staged.request(build_args!("--config", STAGED_CONFIG), config))
        .await
}
