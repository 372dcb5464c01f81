//! Core types for layout violations and lint results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The layout rules a checker can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// A physical line is longer than the configured maximum.
    LineTooLong,
    /// A physical line ends with whitespace.
    TrailingWhitespace,
    /// The document ends with more than one empty line.
    TrailingBlankLines,
    /// The document starts with whitespace or an empty line.
    LeadingWhitespace,
    /// The document does not end with a line terminator.
    MissingTrailingNewline,
}

impl RuleId {
    /// All rule ids, in code order.
    pub const ALL: [Self; 5] = [
        Self::LineTooLong,
        Self::TrailingWhitespace,
        Self::TrailingBlankLines,
        Self::LeadingWhitespace,
        Self::MissingTrailingNewline,
    ];

    /// Returns the rule code (e.g., "LL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::LineTooLong => "LL001",
            Self::TrailingWhitespace => "LL002",
            Self::TrailingBlankLines => "LL003",
            Self::LeadingWhitespace => "LL004",
            Self::MissingTrailingNewline => "LL005",
        }
    }

    /// Returns the kebab-case rule name (e.g., "line-too-long").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LineTooLong => "line-too-long",
            Self::TrailingWhitespace => "trailing-whitespace",
            Self::TrailingBlankLines => "trailing-blank-lines",
            Self::LeadingWhitespace => "leading-whitespace",
            Self::MissingTrailingNewline => "missing-trailing-newline",
        }
    }

    /// Returns a brief description of what this rule checks.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::LineTooLong => "Lines must not be longer than the configured maximum",
            Self::TrailingWhitespace => "Lines must not end with whitespace",
            Self::TrailingBlankLines => "Files must not end with multiple empty lines",
            Self::LeadingWhitespace => "Files must not start with whitespace",
            Self::MissingTrailingNewline => "Files must end with a newline",
        }
    }

    /// Looks up a rule id by code or name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.code().eq_ignore_ascii_case(s) || id.name() == s)
    }

    /// Formats the user-facing message, filling in the violation context.
    #[must_use]
    pub fn message(self, context: Option<usize>) -> String {
        match (self, context) {
            (Self::LineTooLong, Some(max)) => {
                format!("Lines must not be longer than {max} characters.")
            }
            (Self::LineTooLong, None) => "Lines must not be longer than allowed.".to_string(),
            (Self::TrailingWhitespace, _) => "Lines must not end with whitespace.".to_string(),
            (Self::TrailingBlankLines, _) => {
                "Files must not end with multiple empty lines.".to_string()
            }
            (Self::LeadingWhitespace, _) => "Files must not start with whitespace.".to_string(),
            (Self::MissingTrailingNewline, _) => "Files must end with a newline.".to_string(),
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A layout fact found in one document: which rule, on which line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Violated rule.
    pub rule: RuleId,
    /// Line number (1-indexed).
    pub line: usize,
    /// Numeric context for the message (e.g. the maximum line length).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<usize>,
}

impl Violation {
    /// Creates a violation without context.
    #[must_use]
    pub fn new(rule: RuleId, line: usize) -> Self {
        Self {
            rule,
            line,
            context: None,
        }
    }

    /// Attaches numeric context to this violation.
    #[must_use]
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = Some(context);
        self
    }
}

/// Source location of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Document path relative to the analyzed root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// A violation as reported to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "LL001").
    pub code: String,
    /// Rule name (e.g., "line-too-long").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Where the violation was found.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Numeric context of the underlying violation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<usize>,
}

impl Diagnostic {
    /// Creates a diagnostic from a violation found in `file`.
    #[must_use]
    pub fn from_violation(
        violation: &Violation,
        file: impl Into<PathBuf>,
        severity: Severity,
    ) -> Self {
        Self {
            code: violation.rule.code().to_string(),
            rule: violation.rule.name().to_string(),
            severity,
            location: Location::new(file, violation.line),
            message: violation.rule.message(violation.context),
            context: violation.context,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Result of running layout analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All diagnostics found.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of documents checked.
    pub documents_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any diagnostics meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity >= severity)
    }

    /// Counts diagnostics by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diagnostic(severity: Severity) -> Diagnostic {
        let violation = Violation::new(RuleId::LineTooLong, 42).with_context(100);
        Diagnostic::from_violation(&violation, "src/lib.tokens.json", severity)
    }

    #[test]
    fn rule_ids_parse_by_code_and_name() {
        assert_eq!(RuleId::parse("LL002"), Some(RuleId::TrailingWhitespace));
        assert_eq!(RuleId::parse("ll005"), Some(RuleId::MissingTrailingNewline));
        assert_eq!(
            RuleId::parse("leading-whitespace"),
            Some(RuleId::LeadingWhitespace)
        );
        assert_eq!(RuleId::parse("no-tabs"), None);
    }

    #[test]
    fn line_too_long_message_uses_context() {
        assert_eq!(
            RuleId::LineTooLong.message(Some(80)),
            "Lines must not be longer than 80 characters."
        );
    }

    #[test]
    fn diagnostic_carries_rule_metadata() {
        let d = make_diagnostic(Severity::Warning);
        assert_eq!(d.code, "LL001");
        assert_eq!(d.rule, "line-too-long");
        assert_eq!(d.location.line, 42);
        assert_eq!(d.context, Some(100));
        assert_eq!(
            d.to_string(),
            "src/lib.tokens.json:42: warning [LL001] Lines must not be longer than 100 characters."
        );
    }

    #[test]
    fn diagnostics_render_one_per_line() {
        let blank = Violation::new(RuleId::TrailingBlankLines, 7);
        let rendered = [
            make_diagnostic(Severity::Error),
            Diagnostic::from_violation(&blank, "src/main.tokens.json", Severity::Info),
        ]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
        insta::assert_snapshot!(rendered, @r"
        src/lib.tokens.json:42: error [LL001] Lines must not be longer than 100 characters.
        src/main.tokens.json:7: info [LL003] Files must not end with multiple empty lines.
        ");
    }

    #[test]
    fn severity_threshold() {
        let mut result = LintResult::new();
        result.diagnostics.push(make_diagnostic(Severity::Warning));
        assert!(!result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(result.count_by_severity(), (0, 1, 0));
    }

    #[test]
    fn violation_serializes_without_empty_context() {
        let json = serde_json::to_string(&Violation::new(RuleId::LeadingWhitespace, 1)).unwrap();
        assert_eq!(json, r#"{"rule":"leading-whitespace","line":1}"#);
    }
}
