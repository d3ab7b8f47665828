//! Error types for netdeps

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for netdeps operations
pub type NetdepsResult<T> = Result<T, NetdepsError>;

/// Main error type for netdeps operations
#[derive(Error, Debug)]
pub enum NetdepsError {
    /// `dotnet restore` did not succeed for a project; its package section
    /// cannot be reported
    #[error(
        "unable to restore {project}; if NuGet authentication is required, run \
         \"dotnet restore --interactive\" in the project directory first\n\
         output: {output}\nerrors: {errors}"
    )]
    RestoreFailed {
        project: PathBuf,
        output: String,
        errors: String,
    },

    /// MSBuild could not produce the dependency graph spec for an entry project
    #[error("unable to generate dependency graph for {project}\noutput: {output}\nerrors: {errors}")]
    GraphGeneration {
        project: PathBuf,
        output: String,
        errors: String,
    },

    /// The dotnet CLI could not be launched at all
    #[error("failed to launch 'dotnet {args}': {source}")]
    DotnetLaunch {
        args: String,
        source: std::io::Error,
    },

    /// Package dependency chain deeper than the recursion ceiling
    #[error(
        "package dependency chain through '{name}' exceeds {depth} levels; \
         the lock data is likely malformed"
    )]
    DepthLimit { name: String, depth: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("invalid JSON in {file}: {source}")]
    Json {
        file: PathBuf,
        source: serde_json::Error,
    },
}
