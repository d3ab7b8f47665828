//! In-memory graph and lock fixtures for tests
//!
//! Gated behind the `test-utils` feature so integration tests and benchmarks
//! can drive the reporter without a dotnet toolchain on the machine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{NetdepsError, NetdepsResult};
use crate::graph::{
    ProjectGraph, ProjectGraphProvider, ProjectNode, ProjectStyle, TargetFramework,
};
use crate::lock::{LibraryRecord, LockData, LockDataProvider, LockTarget};

/// Graph provider that returns the same pre-built graph for every entry path.
pub struct FixedGraphProvider {
    graph: ProjectGraph,
}

impl FixedGraphProvider {
    pub fn new(graph: ProjectGraph) -> Self {
        Self { graph }
    }
}

impl ProjectGraphProvider for FixedGraphProvider {
    fn build(&self, _entry: &Path) -> NetdepsResult<ProjectGraph> {
        Ok(self.graph.clone())
    }
}

/// Lock provider serving per-project lock data from a map. Projects can be
/// marked as failing restore; projects with no entry get empty lock data.
#[derive(Default)]
pub struct MapLockProvider {
    data: HashMap<String, LockData>,
    failures: HashMap<String, String>,
}

impl MapLockProvider {
    pub fn with_data(mut self, project: &str, data: LockData) -> Self {
        self.data.insert(project.to_ascii_lowercase(), data);
        self
    }

    pub fn with_failure(mut self, project: &str, errors: &str) -> Self {
        self.failures
            .insert(project.to_ascii_lowercase(), errors.to_string());
        self
    }
}

impl LockDataProvider for MapLockProvider {
    fn get(&self, project: &ProjectNode) -> NetdepsResult<LockData> {
        let key = project.name.to_ascii_lowercase();
        if let Some(errors) = self.failures.get(&key) {
            return Err(NetdepsError::RestoreFailed {
                project: project.path.clone(),
                output: String::new(),
                errors: errors.clone(),
            });
        }
        Ok(self.data.get(&key).cloned().unwrap_or_default())
    }
}

/// A project node with conventional paths derived from its name.
pub fn project(name: &str, style: ProjectStyle, frameworks: &[TargetFramework]) -> ProjectNode {
    ProjectNode {
        name: name.to_string(),
        path: PathBuf::from(format!("{name}/{name}.csproj")),
        output_path: PathBuf::from(format!("{name}/obj")),
        style,
        frameworks: frameworks.to_vec(),
    }
}

pub fn framework(id: &str, dependencies: &[&str]) -> TargetFramework {
    TargetFramework {
        id: id.to_string(),
        dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn library(name: &str, version: &str, dependencies: &[&str]) -> LibraryRecord {
    LibraryRecord {
        name: name.to_string(),
        version: version.to_string(),
        dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn lock_target(libraries: Vec<LibraryRecord>) -> LockTarget {
    let mut target = LockTarget::new();
    for record in libraries {
        target.insert(record);
    }
    target
}

pub fn lock_data(framework_id: &str, target: LockTarget) -> LockData {
    let mut data = LockData::default();
    data.insert(framework_id.to_string(), target);
    data
}
