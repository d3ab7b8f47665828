//! Wrapper around the `dotnet` CLI

use std::path::Path;
use std::process::Command;

use crate::error::{NetdepsError, NetdepsResult};

/// Captured result of one `dotnet` invocation.
#[derive(Debug)]
pub struct RunStatus {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run `dotnet` with `args` in `working_dir`, blocking until it exits and
/// capturing everything it prints. A non-zero exit is not an error here;
/// callers decide what a failed invocation means for them.
pub fn run(working_dir: &Path, args: &[&str]) -> NetdepsResult<RunStatus> {
    let output = Command::new("dotnet")
        .args(args)
        .current_dir(working_dir)
        .output()
        .map_err(|source| NetdepsError::DotnetLaunch {
            args: args.join(" "),
            source,
        })?;

    Ok(RunStatus {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
