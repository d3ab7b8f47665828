//! Output rendering for report lines

use std::io::{self, Write};

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented tree, one indentation step per dependency level.
    #[default]
    Nested,
    /// One name per line with no indentation; emission order is preserved.
    Flat,
}

/// Default number of spaces per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Formats `(label, depth)` events as text lines. Pure formatting; filtering
/// and ordering are decided by the walkers.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    indent_width: usize,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            indent_width: INDENT_WIDTH,
        }
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Render one event without the trailing newline.
    pub fn line(&self, label: &str, depth: usize) -> String {
        match self.format {
            OutputFormat::Nested => {
                format!("{}{}", " ".repeat(depth * self.indent_width), label)
            }
            OutputFormat::Flat => label.to_string(),
        }
    }

    /// Write one event as a full line.
    pub fn write_line(&self, out: &mut dyn Write, label: &str, depth: usize) -> io::Result<()> {
        writeln!(out, "{}", self.line(label, depth))
    }
}
