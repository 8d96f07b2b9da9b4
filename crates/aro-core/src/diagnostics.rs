//! Diagnostics collected while analyzing a program.
//!
//! Analysis never stops on a diagnostic: every feature set is analyzed and
//! every message collected before the run concludes. [`Diagnostics`] is the
//! collector the analyzer writes into; callers inspect or render it afterwards.

use std::fmt;

use crate::Span;

/// The severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Suspicious code that still compiles.
    Warning,
    /// Invalid code. Collected, but does not abort analysis.
    Error,
}

impl Severity {
    /// Lowercase label used when rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories of analyzer diagnostics.
///
/// Lets callers and tests identify a diagnostic without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// An own/response statement reads a name nothing defined yet.
    UsedBeforeDefinition,
    /// An internal binding is never consumed.
    UnusedVariable,
    /// `Publish` names an internal variable the feature set never defined.
    UndefinedPublish,
    /// An external dependency no feature set publishes.
    UnresolvedDependency,
    /// Two feature sets publish the same external name.
    DuplicatePublish,
}

impl DiagnosticCode {
    /// Returns a human-readable name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UsedBeforeDefinition => "used before definition",
            DiagnosticCode::UnusedVariable => "unused variable",
            DiagnosticCode::UndefinedPublish => "undefined publish",
            DiagnosticCode::UnresolvedDependency => "unresolved dependency",
            DiagnosticCode::DuplicatePublish => "duplicate publish",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Category.
    pub code: DiagnosticCode,
    /// Message text.
    pub message: String,
    /// Feature set the diagnostic belongs to, if any.
    pub feature_set: Option<String>,
    /// Source location.
    pub span: Span,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit severity.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            feature_set: None,
            span,
        }
    }

    /// Create an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message, span)
    }

    /// Create a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message, span)
    }

    /// Attach the owning feature set.
    pub fn in_feature_set(mut self, name: impl Into<String>) -> Self {
        self.feature_set = Some(name.into());
        self
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    /// Formats as `section:line:col: kind: message`, or `line:col: kind: message`
    /// without a feature set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(section) = &self.feature_set {
            write!(
                f,
                "{}:{}:{}: {}: {}",
                section, self.span.line, self.span.col, self.severity, self.message
            )
        } else {
            write!(
                f,
                "{}:{}: {}: {}",
                self.span.line, self.span.col, self.severity, self.message
            )
        }
    }
}

/// A collection of diagnostics in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl Diagnostics {
    /// Creates a new, empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic to the collection.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Appends every diagnostic from `other`.
    pub fn extend(&mut self, other: Diagnostics) {
        for diagnostic in other.diagnostics {
            self.push(diagnostic);
        }
    }

    /// Returns `true` if any error was reported.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Diagnostics of one category.
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Writes all diagnostics to the provided writer, one per line.
    pub fn emit<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(writer, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_feature_set() {
        let diagnostic = Diagnostic::warning(
            DiagnosticCode::UnusedVariable,
            "unused variable 'total'",
            Span::new(10, 5, 5),
        )
        .in_feature_set("Compute Totals");

        assert_eq!(
            diagnostic.to_string(),
            "Compute Totals:10:5: warning: unused variable 'total'"
        );
    }

    #[test]
    fn display_without_feature_set() {
        let diagnostic = Diagnostic::error(
            DiagnosticCode::UndefinedPublish,
            "cannot publish undefined variable 'x'",
            Span::new(2, 1, 0),
        );
        assert_eq!(
            diagnostic.to_string(),
            "2:1: error: cannot publish undefined variable 'x'"
        );
    }

    #[test]
    fn counts_by_severity() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.has_errors());

        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::UnusedVariable,
            "a",
            Span::default(),
        ));
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::UndefinedPublish,
            "b",
            Span::default(),
        ));
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::UnresolvedDependency,
            "c",
            Span::default(),
        ));

        assert_eq!(diagnostics.count(), 3);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 2);
        assert!(diagnostics.has_errors());
        assert_eq!(
            diagnostics
                .with_code(DiagnosticCode::UnresolvedDependency)
                .count(),
            1
        );
    }

    #[test]
    fn extend_keeps_error_flag() {
        let mut first = Diagnostics::new();
        let mut second = Diagnostics::new();
        second.push(Diagnostic::error(
            DiagnosticCode::UndefinedPublish,
            "x",
            Span::default(),
        ));

        first.extend(second);
        assert!(first.has_errors());
        assert_eq!(first.count(), 1);
    }

    #[test]
    fn emit_writes_one_line_per_diagnostic() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::UnusedVariable,
            "one",
            Span::new(1, 1, 0),
        ));
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::UnusedVariable,
            "two",
            Span::new(2, 1, 0),
        ));

        let mut out = Vec::new();
        diagnostics.emit(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("1:1: warning: one"));
    }
}
