//! Terminal emitter.
//!
//! ```text
//! error[E2001]: type mismatch: expected `i32`, found `f64`
//!   --> main.tn:3:9-3:12
//!    |
//!  3 |     1 + 2.0
//!    |         ^^^ expected `i32`
//!    = note: no implicit conversion between integer and float types
//! ```

use std::io::{self, Write};

use tern_ir::Span;

use super::{colors, ColorMode, DiagnosticEmitter};
use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Source text the emitter quotes when rendering labels.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
    lines: LineOffsetTable,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        SourceFile {
            name: name.into(),
            text,
            lines,
        }
    }

    fn line_col(&self, offset: u32) -> (u32, u32) {
        self.lines.offset_to_line_col(&self.text, offset)
    }
}

/// Terminal emitter with optional color and source snippets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile>,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` is only consulted for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Quote `source` under each label instead of printing raw byte spans.
    #[must_use]
    pub fn with_source(mut self, source: SourceFile) -> Self {
        self.source = Some(source);
        self
    }

    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn label_color(label: &Label) -> &'static str {
        if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        }
    }

    /// `  --> span: message`, used when no source text is attached.
    fn write_label_plain(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { "   " };
        let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
        self.write_colored(&label.message, Self::label_color(label));
        let _ = writeln!(self.writer);
    }

    fn write_label_snippet(&mut self, label: &Label, gutter: usize) {
        let Some(source) = self.source.take() else {
            self.write_label_plain(label);
            return;
        };
        let (line, col) = source.line_col(label.span.start);
        let (end_line, end_col) = source.line_col(label.span.end);
        let marker = if label.is_primary { "-->" } else { ":::" };
        let _ = writeln!(
            self.writer,
            "{:gutter$}{marker} {}:{line}:{col}-{end_line}:{end_col}",
            "", source.name
        );
        let text = source.lines.line_text(&source.text, line).unwrap_or("");
        let _ = writeln!(self.writer, "{:gutter$} |", "");
        let _ = writeln!(self.writer, "{line:>gutter$} | {text}");

        let line_chars = text.chars().count();
        let start = (col as usize).saturating_sub(1).min(line_chars);
        let width = if end_line == line {
            (end_col as usize).saturating_sub(col as usize)
        } else {
            line_chars - start
        }
        .max(1);
        let mark = if label.is_primary { '^' } else { '-' };
        let underline: String = std::iter::repeat(mark).take(width).collect();
        let _ = write!(self.writer, "{:gutter$} | {:start$}", "", "");
        let color = Self::label_color(label);
        if label.message.is_empty() {
            self.write_colored(&underline, color);
        } else {
            self.write_colored(&format!("{underline} {}", label.message), color);
        }
        let _ = writeln!(self.writer);
        self.source = Some(source);
    }

    fn gutter_width(&self, labels: &[Label]) -> usize {
        let Some(source) = &self.source else {
            return 0;
        };
        labels
            .iter()
            .map(|l| source.line_col(l.span.start).0.to_string().len())
            .max()
            .unwrap_or(1)
            + 1
    }

    fn write_trailer(&mut self, kind: &str, color: &str, text: &str, gutter: usize) {
        let _ = write!(self.writer, "{:gutter$} = ", "");
        self.write_colored(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let gutter = self.gutter_width(&diagnostic.labels);
        for label in &diagnostic.labels {
            if self.source.is_some() && label.span != Span::DUMMY {
                self.write_label_snippet(label, gutter);
            } else {
                self.write_label_plain(label);
            }
        }
        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note, gutter);
        }
        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, suggestion, gutter);
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
