//! Project dependency graph model and the MSBuild-backed graph provider

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::dotnet;
use crate::error::{NetdepsError, NetdepsResult};

/// How a project declares its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStyle {
    /// PackageReference restore metadata; the project carries a resolvable
    /// package dependency tree.
    PackageReference,
    /// Anything else (packages.config, unknown). No package section is
    /// reported for these.
    Other,
}

/// One target framework of a project with its declared direct package
/// dependencies, in declaration order.
#[derive(Debug, Clone)]
pub struct TargetFramework {
    pub id: String,
    pub dependencies: Vec<String>,
}

/// A project reachable from an entry point. Immutable once the graph is built.
#[derive(Debug, Clone)]
pub struct ProjectNode {
    pub name: String,
    pub path: PathBuf,
    /// Restore output directory; the lock artifact is expected here.
    pub output_path: PathBuf,
    pub style: ProjectStyle,
    pub frameworks: Vec<TargetFramework>,
}

/// Ordered set of projects reachable from one entry point. The order is the
/// provider's; consumers never re-sort it.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    pub projects: Vec<ProjectNode>,
}

/// Builds the project graph for an entry-point project file.
pub trait ProjectGraphProvider {
    fn build(&self, entry: &Path) -> NetdepsResult<ProjectGraph>;
}

/// Project name as reported for an entry path: the file name without its
/// extension.
pub fn project_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Graph provider backed by `dotnet msbuild /t:GenerateRestoreGraphFile`.
///
/// MSBuild writes a dependency graph spec JSON document describing every
/// project reachable from the entry point; we parse that document. A failed
/// invocation or malformed document is fatal for the whole report.
pub struct MsBuildGraphProvider;

impl ProjectGraphProvider for MsBuildGraphProvider {
    fn build(&self, entry: &Path) -> NetdepsResult<ProjectGraph> {
        let spec_file = tempfile::Builder::new()
            .prefix("netdeps-dgspec-")
            .suffix(".json")
            .tempfile()?;

        let working_dir = entry
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let project_arg = entry.to_string_lossy();
        let output_arg = format!("/p:RestoreGraphOutputPath={}", spec_file.path().display());

        let status = dotnet::run(
            working_dir,
            &[
                "msbuild",
                project_arg.as_ref(),
                "/t:GenerateRestoreGraphFile",
                output_arg.as_str(),
            ],
        )?;
        if !status.success {
            return Err(NetdepsError::GraphGeneration {
                project: entry.to_path_buf(),
                output: status.stdout,
                errors: status.stderr,
            });
        }

        let text = fs::read_to_string(spec_file.path())?;
        parse_graph_spec(spec_file.path(), &text)
    }
}

/// Raw shape of the dependency graph spec document. Only the parts the report
/// needs are modeled; map fields keep document order.
#[derive(Deserialize)]
struct GraphSpec {
    #[serde(default)]
    projects: Map<String, Value>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ProjectSpec {
    restore: RestoreSection,
    frameworks: Map<String, Value>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RestoreSection {
    project_name: Option<String>,
    project_style: Option<String>,
    output_path: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FrameworkSection {
    dependencies: Map<String, Value>,
}

/// Parse a dependency graph spec document into a [`ProjectGraph`]. Projects
/// and their dependencies keep document order.
pub fn parse_graph_spec(file: &Path, text: &str) -> NetdepsResult<ProjectGraph> {
    let spec: GraphSpec = serde_json::from_str(text).map_err(|source| NetdepsError::Json {
        file: file.to_path_buf(),
        source,
    })?;

    let mut projects = Vec::new();
    for (project_path, value) in spec.projects {
        let project: ProjectSpec =
            serde_json::from_value(value).map_err(|source| NetdepsError::Json {
                file: file.to_path_buf(),
                source,
            })?;

        let path = PathBuf::from(&project_path);
        let name = project
            .restore
            .project_name
            .unwrap_or_else(|| project_name_from_path(&path));
        let style = match project.restore.project_style.as_deref() {
            Some("PackageReference") => ProjectStyle::PackageReference,
            _ => ProjectStyle::Other,
        };
        let output_path = project
            .restore
            .output_path
            .map(PathBuf::from)
            .unwrap_or_default();

        let mut frameworks = Vec::new();
        for (id, framework_value) in project.frameworks {
            let framework: FrameworkSection =
                serde_json::from_value(framework_value).map_err(|source| NetdepsError::Json {
                    file: file.to_path_buf(),
                    source,
                })?;
            frameworks.push(TargetFramework {
                id,
                dependencies: framework.dependencies.keys().cloned().collect(),
            });
        }

        projects.push(ProjectNode {
            name,
            path,
            output_path,
            style,
            frameworks,
        });
    }

    Ok(ProjectGraph { projects })
}
