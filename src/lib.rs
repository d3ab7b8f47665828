//! Netdeps - project and package dependency tree reporting for .NET projects

pub mod dotnet;
pub mod error;
pub mod filter;
pub mod graph;
pub mod lock;
pub mod render;
pub mod report;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{NetdepsError, NetdepsResult};
pub use filter::FilterSpec;
pub use graph::{
    MsBuildGraphProvider, ProjectGraph, ProjectGraphProvider, ProjectNode, ProjectStyle,
    TargetFramework,
};
pub use lock::{LibraryRecord, LockData, LockDataProvider, LockFileProvider, LockTarget};
pub use render::{OutputFormat, Renderer};
pub use report::{Level, ReportOptions, Reporter};
pub use walk::{PackageEvent, walk_packages};
