//! Report driver: orchestrates graph traversal, lock lookup and rendering

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{NetdepsError, NetdepsResult};
use crate::filter::FilterSpec;
use crate::graph::{ProjectGraphProvider, ProjectNode, project_name_from_path};
use crate::lock::LockDataProvider;
use crate::render::Renderer;
use crate::walk::{accepted_projects, walk_packages};

/// How deep the report goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    /// Depended-on projects only.
    Project,
    /// Projects plus the package tree per target framework.
    #[default]
    Package,
}

/// Options for one report run.
#[derive(Debug, Default)]
pub struct ReportOptions {
    pub level: Level,
    pub project_filter: FilterSpec,
    pub package_filter: FilterSpec,
}

/// Drives the report: entry projects at depth 0, accepted depended-on projects
/// at depth 1, a framework header at depth 2 and the package tree below it.
///
/// Entries are processed to completion one at a time; every traversal builds
/// its own state.
pub struct Reporter<'a> {
    graph_provider: &'a dyn ProjectGraphProvider,
    lock_provider: &'a dyn LockDataProvider,
    options: ReportOptions,
    renderer: Renderer,
}

impl<'a> Reporter<'a> {
    pub fn new(
        graph_provider: &'a dyn ProjectGraphProvider,
        lock_provider: &'a dyn LockDataProvider,
        options: ReportOptions,
        renderer: Renderer,
    ) -> Self {
        Self {
            graph_provider,
            lock_provider,
            options,
            renderer,
        }
    }

    /// Run the report for each entry project in order, writing report lines to
    /// `out` and restore diagnostics to `diag`.
    pub fn run(
        &self,
        entries: &[PathBuf],
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> NetdepsResult<()> {
        for entry in entries {
            self.report_entry(entry, out, diag)?;
        }
        Ok(())
    }

    fn report_entry(
        &self,
        entry: &Path,
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> NetdepsResult<()> {
        self.renderer
            .write_line(out, &project_name_from_path(entry), 0)?;

        let graph = self.graph_provider.build(entry)?;
        for project in accepted_projects(&graph, &self.options.project_filter) {
            self.renderer.write_line(out, &project.name, 1)?;

            if self.options.level == Level::Package {
                self.report_packages(project, out, diag)?;
            }
        }
        Ok(())
    }

    fn report_packages(
        &self,
        project: &ProjectNode,
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> NetdepsResult<()> {
        let lock_data = match self.lock_provider.get(project) {
            Ok(data) => data,
            Err(err @ NetdepsError::RestoreFailed { .. }) => {
                // The project line stays in the report; only its package
                // section is lost.
                writeln!(diag, "netdeps: {err}")?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        for framework in &project.frameworks {
            self.renderer
                .write_line(out, &format!("[{}]", framework.id), 2)?;

            // No lock target for this framework: skip its packages only.
            let Some(target) = lock_data.target(&framework.id) else {
                continue;
            };

            let events = walk_packages(
                &framework.dependencies,
                target,
                &self.options.package_filter,
            )?;
            for event in events {
                let label = format!("{}, v{}", event.name, event.version);
                self.renderer.write_line(out, &label, event.depth + 3)?;
            }
        }
        Ok(())
    }
}
