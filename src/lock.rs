//! Resolved lock data model and the project.assets.json-backed provider

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::dotnet;
use crate::error::{NetdepsError, NetdepsResult};
use crate::graph::ProjectNode;

/// File name of the NuGet lock artifact under a project's restore output path.
pub const LOCK_FILE_NAME: &str = "project.assets.json";

/// One resolved library within a lock target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRecord {
    pub name: String,
    pub version: String,
    /// Direct dependency names in declared order.
    pub dependencies: Vec<String>,
}

/// All resolved libraries for one target framework, with unambiguous
/// case-insensitive lookup by name.
#[derive(Debug, Clone, Default)]
pub struct LockTarget {
    libraries: Vec<LibraryRecord>,
    index: HashMap<String, usize>,
}

impl LockTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A record whose name (case-insensitively) is already
    /// present is dropped so lookups stay unambiguous.
    pub fn insert(&mut self, record: LibraryRecord) {
        let key = record.name.to_ascii_lowercase();
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key, self.libraries.len());
        self.libraries.push(record);
    }

    /// Case-insensitive lookup by library name.
    pub fn get(&self, name: &str) -> Option<&LibraryRecord> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.libraries[i])
    }

    pub fn libraries(&self) -> &[LibraryRecord] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// Lock data for one project: a lock target per target framework, in document
/// order.
#[derive(Debug, Clone, Default)]
pub struct LockData {
    targets: Vec<(String, LockTarget)>,
}

impl LockData {
    pub fn insert(&mut self, framework: String, target: LockTarget) {
        self.targets.push((framework, target));
    }

    /// Case-insensitive lookup of the lock target for a framework identifier.
    pub fn target(&self, framework: &str) -> Option<&LockTarget> {
        self.targets
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(framework))
            .map(|(_, target)| target)
    }
}

/// Supplies resolved lock data for an accepted project.
///
/// Fetching may block on an external restore; a [`NetdepsError::RestoreFailed`]
/// is fatal for the project's package section only, anything else for the
/// whole report.
pub trait LockDataProvider {
    fn get(&self, project: &ProjectNode) -> NetdepsResult<LockData>;
}

/// Provider reading `project.assets.json` from the project's restore output
/// path, running `dotnet restore` first when the artifact is missing.
pub struct LockFileProvider;

impl LockDataProvider for LockFileProvider {
    fn get(&self, project: &ProjectNode) -> NetdepsResult<LockData> {
        let lock_path = project.output_path.join(LOCK_FILE_NAME);
        if !lock_path.exists() {
            self.restore(project)?;
        }

        let text = fs::read_to_string(&lock_path)?;
        parse_lock_file(&lock_path, &text)
    }
}

impl LockFileProvider {
    fn restore(&self, project: &ProjectNode) -> NetdepsResult<()> {
        let working_dir = project
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let project_arg = project.path.to_string_lossy();

        let status = dotnet::run(working_dir, &["restore", project_arg.as_ref()])?;
        if !status.success {
            return Err(NetdepsError::RestoreFailed {
                project: project.path.clone(),
                output: status.stdout,
                errors: status.stderr,
            });
        }
        Ok(())
    }
}

/// Raw shape of the assets document. Each target maps `Name/Version` library
/// keys to entries whose `dependencies` map keeps declared order.
#[derive(Deserialize)]
struct AssetsFile {
    #[serde(default)]
    targets: Map<String, Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LibraryEntry {
    dependencies: Map<String, Value>,
}

/// Parse a `project.assets.json` document into [`LockData`].
pub fn parse_lock_file(file: &Path, text: &str) -> NetdepsResult<LockData> {
    let assets: AssetsFile = serde_json::from_str(text).map_err(|source| NetdepsError::Json {
        file: file.to_path_buf(),
        source,
    })?;

    let mut data = LockData::default();
    for (framework, value) in assets.targets {
        let libraries: Map<String, Value> =
            serde_json::from_value(value).map_err(|source| NetdepsError::Json {
                file: file.to_path_buf(),
                source,
            })?;

        let mut target = LockTarget::new();
        for (key, entry_value) in libraries {
            let entry: LibraryEntry =
                serde_json::from_value(entry_value).map_err(|source| NetdepsError::Json {
                    file: file.to_path_buf(),
                    source,
                })?;
            let (name, version) = split_library_key(&key);
            target.insert(LibraryRecord {
                name,
                version,
                dependencies: entry.dependencies.keys().cloned().collect(),
            });
        }
        data.insert(framework, target);
    }

    Ok(data)
}

/// Library keys in the assets document are `Name/Version`.
fn split_library_key(key: &str) -> (String, String) {
    match key.split_once('/') {
        Some((name, version)) => (name.to_string(), version.to_string()),
        None => (key.to_string(), String::new()),
    }
}
