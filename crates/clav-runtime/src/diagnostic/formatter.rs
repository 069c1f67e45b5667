//! Color-aware diagnostic formatter
//!
//! Formats diagnostics with source snippets, caret indicators, and optional
//! terminal colors. Respects the NO_COLOR environment variable and
//! auto-detects terminal capabilities.

use crate::diagnostic::Diagnostic;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Color mode for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Auto-detect terminal capabilities
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor ColorChoice
    pub fn to_color_choice(self) -> ColorChoice {
        // Always respect NO_COLOR (https://no-color.org)
        if std::env::var_os("NO_COLOR").is_some() {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

/// Diagnostic formatter with color support
pub struct DiagnosticFormatter {
    color_mode: ColorMode,
}

impl DiagnosticFormatter {
    /// Create a new formatter with the given color mode
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Create a formatter that auto-detects color support
    pub fn auto() -> Self {
        Self::new(ColorMode::Auto)
    }

    /// Create a plain (no color) formatter
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    /// Format a diagnostic to stderr
    pub fn emit(&self, diag: &Diagnostic) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        self.write_diagnostic(&mut stream, diag)
    }

    /// Format multiple diagnostics to stderr
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        for diag in diagnostics {
            self.write_diagnostic(&mut stream, diag)?;
        }
        Ok(())
    }

    /// Format a diagnostic to a WriteColor sink
    pub fn write_diagnostic(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        self.write_header(w, diag)?;
        self.write_location(w, diag)?;

        if !diag.snippet.is_empty() {
            self.write_snippet(w, diag)?;
        }

        for note in &diag.notes {
            self.write_trailer(w, "note", Color::White, note)?;
        }

        if let Some(help) = &diag.help {
            self.write_trailer(w, "help", Color::Green, help)?;
        }

        writeln!(w)?;
        Ok(())
    }

    /// Format a diagnostic to a buffer without colors
    pub fn format_to_buffer(&self, diag: &Diagnostic) -> Vec<u8> {
        let mut buf = termcolor::Buffer::no_color();
        // Writing into memory cannot fail
        let _ = self.write_diagnostic(&mut buf, diag);
        buf.into_inner()
    }

    fn write_header(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(w, "error[{}]", diag.code)?;
        w.reset()?;

        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, ": {}", diag.message)?;
        w.reset()?;
        writeln!(w)?;
        Ok(())
    }

    fn write_location(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        w.set_color(&gutter())?;
        write!(w, "  --> ")?;
        w.reset()?;
        writeln!(w, "{}:{}:{}", diag.file, diag.line, diag.column)?;
        Ok(())
    }

    fn write_snippet(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        let width = gutter_width(diag.line);

        w.set_color(&gutter())?;
        write!(w, "{:>width$} |", "")?;
        w.reset()?;
        writeln!(w)?;

        w.set_color(&gutter())?;
        write!(w, "{:>width$} | ", diag.line)?;
        w.reset()?;
        writeln!(w, "{}", diag.snippet)?;

        if diag.length > 0 {
            w.set_color(&gutter())?;
            write!(w, "{:>width$} | ", "")?;
            w.reset()?;

            let col = diag.column.saturating_sub(1);
            write!(w, "{}", " ".repeat(col))?;

            let available = diag.snippet.chars().count().saturating_sub(col).max(1);
            let caret_len = diag.length.min(available);

            w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(w, "{}", "^".repeat(caret_len))?;
            if !diag.label.is_empty() {
                write!(w, " {}", diag.label)?;
            }
            w.reset()?;
            writeln!(w)?;
        }

        Ok(())
    }

    fn write_trailer(
        &self,
        w: &mut impl WriteColor,
        kind: &str,
        color: Color,
        text: &str,
    ) -> io::Result<()> {
        w.set_color(&gutter())?;
        write!(w, "   = ")?;
        w.reset()?;

        w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(w, "{}", kind)?;
        w.reset()?;

        writeln!(w, ": {}", text)?;
        Ok(())
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::auto()
    }
}

fn gutter() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Cyan)).set_bold(true);
    spec
}

/// Width of the line-number column, shared by both renderers
pub(crate) fn gutter_width(line: usize) -> usize {
    line.to_string().len().max(2)
}

/// Source line `line` (1-based), without its terminator
pub fn extract_snippet(source: &str, line: usize) -> Option<String> {
    source
        .lines()
        .nth(line.saturating_sub(1))
        .map(|l| l.trim_end_matches('\r').to_string())
}

/// 1-based line and column of a character offset
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.chars().enumerate() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
