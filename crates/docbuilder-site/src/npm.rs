//! npm invocation.

use std::future::Future;
use std::path::Path;

use tokio::process::Command;

use crate::builder::BuildError;

/// Lock and manifest files copied next to the staged docs.
pub const PACKAGE_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Runs external commands for the pipeline.
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` in `dir`, failing on a non-zero exit.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: &Path,
    ) -> impl Future<Output = Result<(), BuildError>> + Send;
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<(), BuildError> {
        let command = command_line(program, args);
        tracing::debug!("Running `{}` in {}", command, dir.display());

        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .await
            .map_err(|e| BuildError::CommandError {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandError {
                command,
                message: format!("exited with {status}"),
            })
        }
    }
}

pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
