//! End-to-end report scenarios against in-memory providers

use std::path::{Path, PathBuf};

use netdeps::test_utils::{
    FixedGraphProvider, MapLockProvider, framework, library, lock_data, lock_target, project,
};
use netdeps::{
    FilterSpec, Level, OutputFormat, ProjectGraph, ProjectStyle, Renderer, ReportOptions, Reporter,
    graph::parse_graph_spec, lock::parse_lock_file,
};

fn run(
    entries: &[&str],
    graph: ProjectGraph,
    locks: MapLockProvider,
    options: ReportOptions,
    format: OutputFormat,
) -> (String, String) {
    let graphs = FixedGraphProvider::new(graph);
    let reporter = Reporter::new(&graphs, &locks, options, Renderer::new(format));
    let entries: Vec<PathBuf> = entries.iter().map(PathBuf::from).collect();
    let mut out = Vec::new();
    let mut diag = Vec::new();
    reporter.run(&entries, &mut out, &mut diag).unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(diag).unwrap(),
    )
}

fn solution_graph() -> ProjectGraph {
    ProjectGraph {
        projects: vec![
            project("App", ProjectStyle::PackageReference, &[framework(
                "net8.0",
                &["Serilog"],
            )]),
            project("App.Core", ProjectStyle::PackageReference, &[framework(
                "net8.0",
                &["Dapper"],
            )]),
            project("Legacy", ProjectStyle::Other, &[]),
        ],
    }
}

fn solution_locks() -> MapLockProvider {
    MapLockProvider::default()
        .with_data(
            "App",
            lock_data(
                "net8.0",
                lock_target(vec![
                    library("Serilog", "3.1.1", &[]),
                ]),
            ),
        )
        .with_data(
            "App.Core",
            lock_data(
                "net8.0",
                lock_target(vec![
                    library("Dapper", "2.1.35", &["System.Data.SqlClient"]),
                    library("System.Data.SqlClient", "4.8.6", &[]),
                ]),
            ),
        )
}

#[test]
fn test_multiple_entries_are_reported_in_order() {
    let (out, _) = run(
        &["src/App/App.csproj", "src/Tool/Tool.csproj"],
        solution_graph(),
        solution_locks(),
        ReportOptions {
            level: Level::Project,
            ..Default::default()
        },
        OutputFormat::Nested,
    );
    assert_eq!(
        out,
        "App\n  App\n  App.Core\nTool\n  App\n  App.Core\n"
    );
}

#[test]
fn test_project_exclude_prefix() {
    let options = ReportOptions {
        level: Level::Project,
        project_filter: FilterSpec::new(vec![], vec!["App.".to_string()]),
        ..Default::default()
    };
    let (out, _) = run(
        &["src/App/App.csproj"],
        solution_graph(),
        solution_locks(),
        options,
        OutputFormat::Nested,
    );
    assert_eq!(out, "App\n  App\n");
}

#[test]
fn test_package_include_prefix_hides_other_packages_without_pruning() {
    let options = ReportOptions {
        package_filter: FilterSpec::new(vec!["System.".to_string()], vec![]),
        ..Default::default()
    };
    let (out, _) = run(
        &["src/App/App.csproj"],
        solution_graph(),
        solution_locks(),
        options,
        OutputFormat::Nested,
    );
    // Dapper is hidden by the include filter but its System.* child is kept
    // one level below the slot Dapper would have held.
    assert_eq!(
        out,
        "App\n  App\n    [net8.0]\n  App.Core\n    [net8.0]\n        System.Data.SqlClient, v4.8.6\n"
    );
}

#[test]
fn test_flat_format_full_report() {
    let (out, _) = run(
        &["src/App/App.csproj"],
        solution_graph(),
        solution_locks(),
        ReportOptions::default(),
        OutputFormat::Flat,
    );
    assert_eq!(
        out,
        "App\nApp\n[net8.0]\nSerilog, v3.1.1\nApp.Core\n[net8.0]\nDapper, v2.1.35\nSystem.Data.SqlClient, v4.8.6\n"
    );
}

#[test]
fn test_restore_failure_reports_remaining_projects() {
    let locks = solution_locks().with_failure("App", "NU1301: repository unreachable");
    let (out, diag) = run(
        &["src/App/App.csproj"],
        solution_graph(),
        locks,
        ReportOptions::default(),
        OutputFormat::Nested,
    );
    // App keeps its project line but has no package section; App.Core is
    // still fully reported.
    assert_eq!(
        out,
        "App\n  App\n  App.Core\n    [net8.0]\n      Dapper, v2.1.35\n        System.Data.SqlClient, v4.8.6\n"
    );
    assert!(diag.contains("NU1301"));
}

#[test]
fn test_report_from_parsed_documents() {
    // Wires the real dgspec and assets parsers into the reporter, bypassing
    // only the dotnet invocations.
    let dgspec = r#"{
        "projects": {
            "/repo/App/App.csproj": {
                "restore": { "projectName": "App", "projectStyle": "PackagesConfig" }
            },
            "/repo/Lib/Lib.csproj": {
                "restore": {
                    "projectName": "Lib",
                    "projectStyle": "PackageReference",
                    "outputPath": "/repo/Lib/obj/"
                },
                "frameworks": {
                    "net8.0": {
                        "dependencies": { "PkgA": { "version": "[1.0.0, )" } }
                    }
                }
            }
        }
    }"#;
    let assets = r#"{
        "targets": {
            "net8.0": {
                "PkgA/1.0.0": { "dependencies": { "PkgB": "2.0.0" } },
                "PkgB/2.0.0": {}
            }
        }
    }"#;

    let graph = parse_graph_spec(Path::new("dg.json"), dgspec).unwrap();
    let locks = MapLockProvider::default().with_data(
        "Lib",
        parse_lock_file(Path::new("project.assets.json"), assets).unwrap(),
    );

    let (out, diag) = run(
        &["/repo/App/App.csproj"],
        graph,
        locks,
        ReportOptions::default(),
        OutputFormat::Nested,
    );
    assert_eq!(
        out,
        "App\n  Lib\n    [net8.0]\n      PkgA, v1.0.0\n        PkgB, v2.0.0\n"
    );
    assert!(diag.is_empty());
}
