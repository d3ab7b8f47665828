//! Depth-first traversal of project and package dependency graphs

use crate::error::{NetdepsError, NetdepsResult};
use crate::filter::FilterSpec;
use crate::graph::{ProjectGraph, ProjectNode, ProjectStyle};
use crate::lock::LockTarget;

/// Ceiling on package recursion depth. The per-path cycle guard keeps the
/// traversal finite; this bound turns pathological lock data into a
/// diagnosable error instead of a stack overflow.
pub const MAX_PACKAGE_DEPTH: usize = 256;

/// One rendered package occurrence: the resolved record's identity and its
/// depth below the framework header (roots are depth 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEvent {
    pub name: String,
    pub version: String,
    pub depth: usize,
}

/// Walk one target framework's library graph depth-first, pre-order, from the
/// declared root dependency names, applying `filter` to each record's own
/// name.
///
/// - A root or dependency name with no matching record is skipped silently;
///   stale or partially restored lock data is expected.
/// - A record rejected by the filter is hidden from the output, but its
///   dependencies are still visited one level deeper. Filtering never prunes.
/// - A name already on the current path is neither re-emitted nor entered
///   again, so no library appears twice on the same path from a root.
///
/// Dependencies are visited in declared order; output is deterministic for
/// identical input.
pub fn walk_packages(
    roots: &[String],
    target: &LockTarget,
    filter: &FilterSpec,
) -> NetdepsResult<Vec<PackageEvent>> {
    let mut events = Vec::new();
    let mut path = Vec::new();
    for root in roots {
        visit(root, target, filter, 0, &mut path, &mut events)?;
    }
    Ok(events)
}

fn visit(
    name: &str,
    target: &LockTarget,
    filter: &FilterSpec,
    depth: usize,
    path: &mut Vec<String>,
    events: &mut Vec<PackageEvent>,
) -> NetdepsResult<()> {
    if depth >= MAX_PACKAGE_DEPTH {
        return Err(NetdepsError::DepthLimit {
            name: name.to_string(),
            depth,
        });
    }

    // Stale lock data: the declared name has no record, the branch ends here.
    let Some(record) = target.get(name) else {
        return Ok(());
    };

    let key = record.name.to_ascii_lowercase();
    if path.contains(&key) {
        return Ok(());
    }

    if filter.includes(&record.name) {
        events.push(PackageEvent {
            name: record.name.clone(),
            version: record.version.clone(),
            depth,
        });
    }

    path.push(key);
    for dependency in &record.dependencies {
        visit(dependency, target, filter, depth + 1, path, events)?;
    }
    path.pop();

    Ok(())
}

/// Projects from `graph` that are PackageReference-style and pass `filter`,
/// in the order the graph provider supplied them.
pub fn accepted_projects<'a>(
    graph: &'a ProjectGraph,
    filter: &FilterSpec,
) -> Vec<&'a ProjectNode> {
    graph
        .projects
        .iter()
        .filter(|project| {
            project.style == ProjectStyle::PackageReference && filter.includes(&project.name)
        })
        .collect()
}
