//! Structured diagnostics shared by every stage of the pipeline.
//!
//! The semantic analyzer's output is part of an external contract
//! (downstream tests match message text verbatim), so [`Diagnostic`]
//! keeps the exact message separate from rendering: [`Diagnostic::render_canonical`]
//! produces the line-based form the analyzer is specified to produce;
//! [`Diagnostic::render_pretty`] produces an annotated snippet for
//! interactive lexer/parser errors.

use colored::Colorize;
use std::fmt;

pub mod error_codes;
pub mod fuzzy;

/// A location in a source file, used both for input tokens and for
/// diagnostics anchored to them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(file: Option<String>, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    pub fn unknown() -> Self {
        Self {
            file: None,
            line: 0,
            column: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}, line {}:{}", self.line, self.column),
            None => write!(f, "line {}:{}", self.line, self.column),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "{}", "error".red().bold()),
            Severity::Warning => write!(f, "{}", "warning".yellow().bold()),
            Severity::Note => write!(f, "{}", "note".blue().bold()),
        }
    }
}

/// Which pipeline stage produced a diagnostic; used only to choose the
/// word that the canonical line embeds ("Semantic error", "Syntax
/// error", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
    Semantic,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::Lexer => "Lexical error",
            Stage::Parser => "Syntax error",
            Stage::Semantic => "Semantic error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub code: String,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, stage: Stage, code: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            stage,
            code: code.into(),
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    pub fn error(stage: Stage, code: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, stage, code, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// The canonical one-line form required of the semantic analyzer:
    /// `"<filename>", line <L>:<C>, Semantic error: <message>`. The
    /// filename segment is omitted entirely when none is known.
    pub fn render_canonical(&self) -> String {
        match &self.span.file {
            Some(file) => format!(
                "\"{file}\", line {}:{}, {}: {}",
                self.span.line,
                self.span.column,
                self.stage.label(),
                self.message
            ),
            None => format!(
                "line {}:{}, {}: {}",
                self.span.line,
                self.span.column,
                self.stage.label(),
                self.message
            ),
        }
    }

    /// An annotated snippet, source-excerpt form, used for CLI display.
    pub fn render_pretty(&self, source: &str) -> String {
        let mut out = format!("{}: {}\n", self.severity, self.message);
        out.push_str(&format!("  --> {}\n", self.span));
        if let Some(line_text) = source.lines().nth(self.span.line.saturating_sub(1) as usize) {
            out.push_str(&format!("   | {line_text}\n"));
            let caret_col = self.span.column.saturating_sub(1) as usize;
            out.push_str(&format!("   | {}^\n", " ".repeat(caret_col)));
        }
        for note in &self.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_canonical())
    }
}

/// Accumulates diagnostics across an entire compilation run.
#[derive(Debug, Default)]
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, stage: Stage, code: impl Into<String>, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(stage, code, message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn render_canonical_all(&self) -> String {
        self.diagnostics
            .iter()
            .map(Diagnostic::render_canonical)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print_all(&self) {
        for diagnostic in &self.diagnostics {
            println!("{}", diagnostic.render_canonical());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_format_matches_contract_with_filename() {
        let diag = Diagnostic::error(
            Stage::Semantic,
            error_codes::E_UNDEFINED_IDENTIFIER,
            "Undefined identifier x",
            Span::new(Some("foo.cl".into()), 4, 7),
        );
        assert_eq!(
            diag.render_canonical(),
            "\"foo.cl\", line 4:7, Semantic error: Undefined identifier x"
        );
    }

    #[test]
    fn canonical_format_omits_filename_when_absent() {
        let diag = Diagnostic::error(
            Stage::Semantic,
            error_codes::E_UNDEFINED_IDENTIFIER,
            "Undefined identifier x",
            Span::new(None, 4, 7),
        );
        assert_eq!(diag.render_canonical(), "line 4:7, Semantic error: Undefined identifier x");
    }

    #[test]
    fn engine_tracks_error_count() {
        let mut engine = DiagnosticEngine::new();
        assert!(!engine.has_errors());
        engine.error(Stage::Semantic, "S0001", "boom", Span::unknown());
        assert!(engine.has_errors());
        assert_eq!(engine.error_count(), 1);
    }
}
