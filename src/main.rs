//! CLI entry point for netdeps

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use netdeps::{
    FilterSpec, Level, LockFileProvider, MsBuildGraphProvider, OutputFormat, Renderer,
    ReportOptions, Reporter,
};

/// Help and version requests exit non-zero, distinct from usage errors.
const EXIT_HELP: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Color output mode for diagnostics
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Diagnostics go to stderr
            std::io::stderr().is_terminal()
        }
    }
}

/// Report depth
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LevelArg {
    /// Depended-on projects only
    Project,
    /// Projects and their package trees
    #[default]
    Package,
}

/// Report layout
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum FormatArg {
    /// Indented tree
    #[default]
    Nested,
    /// One name per line, no indentation
    Flat,
}

#[derive(Parser, Debug)]
#[command(name = "netdeps")]
#[command(about = "Reports the project and package dependency tree of .NET projects")]
#[command(version)]
struct Args {
    /// Entry-point project files to analyze
    #[arg(required = true, value_name = "PROJECT")]
    projects: Vec<PathBuf>,

    /// Only report depended-on projects whose name starts with PREFIX
    /// (repeatable)
    #[arg(long = "project-include", value_name = "PREFIX")]
    project_include: Vec<String>,

    /// Skip depended-on projects whose name starts with PREFIX (repeatable)
    #[arg(long = "project-exclude", value_name = "PREFIX")]
    project_exclude: Vec<String>,

    /// Only report packages whose name starts with PREFIX (repeatable)
    #[arg(long = "package-include", value_name = "PREFIX")]
    package_include: Vec<String>,

    /// Skip packages whose name starts with PREFIX (repeatable)
    #[arg(long = "package-exclude", value_name = "PREFIX")]
    package_exclude: Vec<String>,

    /// Report at project or package level
    #[arg(long, value_enum, default_value_t = LevelArg::Package)]
    level: LevelArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Nested)]
    format: FormatArg,

    /// Control color of diagnostics: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_HELP,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let options = ReportOptions {
        level: match args.level {
            LevelArg::Project => Level::Project,
            LevelArg::Package => Level::Package,
        },
        project_filter: FilterSpec::new(args.project_include, args.project_exclude),
        package_filter: FilterSpec::new(args.package_include, args.package_exclude),
    };
    let renderer = Renderer::new(match args.format {
        FormatArg::Nested => OutputFormat::Nested,
        FormatArg::Flat => OutputFormat::Flat,
    });

    let graph_provider = MsBuildGraphProvider;
    let lock_provider = LockFileProvider;
    let reporter = Reporter::new(&graph_provider, &lock_provider, options, renderer);

    let choice = if should_use_color(args.color) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut diag = StandardStream::stderr(choice);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = reporter.run(&args.projects, &mut out, &mut diag) {
        if report_error(&mut diag, &err.to_string()).is_err() {
            eprintln!("netdeps: {err}");
        }
        process::exit(1);
    }
}

/// Print a fatal error with a highlighted prefix.
fn report_error(stream: &mut StandardStream, message: &str) -> io::Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(stream, "netdeps: ")?;
    stream.reset()?;
    writeln!(stream, "{message}")
}
