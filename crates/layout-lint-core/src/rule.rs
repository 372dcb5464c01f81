//! Rule trait for defining document checkers.

use crate::config::LayoutSettings;
use crate::document::Document;
use crate::flatten::FlattenError;
use crate::types::{RuleId, Severity, Violation};

/// Errors that abort the check of one document.
///
/// These are precondition or internal-consistency failures; layout findings
/// are always returned as [`Violation`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The document has no tokens to check.
    #[error("Document has no tokens")]
    EmptyDocument,

    /// The token tree and the token taxonomy disagree.
    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

/// A checker that inspects one tokenized document.
///
/// A rule may report several [`RuleId`]s; the analyzer applies per-rule
/// configuration (enablement, severity) to each reported id.
///
/// # Example
///
/// ```ignore
/// use layout_lint_core::{CheckError, Document, LayoutSettings, Rule, RuleId, Violation};
///
/// pub struct NoEmptyDocument;
///
/// impl Rule for NoEmptyDocument {
///     fn name(&self) -> &'static str { "no-empty-document" }
///     fn rule_ids(&self) -> &'static [RuleId] { &[RuleId::MissingTrailingNewline] }
///
///     fn check(&self, doc: &Document, _: &LayoutSettings) -> Result<Vec<Violation>, CheckError> {
///         if doc.is_empty() {
///             return Err(CheckError::EmptyDocument);
///         }
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this checker (e.g., "layout").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this checker does.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the rule ids this checker can report.
    fn rule_ids(&self) -> &'static [RuleId];

    /// Returns the default severity for violations from this checker.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single document and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] if the document violates a precondition of
    /// the checker or its token tree is inconsistent.
    fn check(
        &self,
        document: &Document,
        settings: &LayoutSettings,
    ) -> Result<Vec<Violation>, CheckError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    struct FirstLineRule;

    impl Rule for FirstLineRule {
        fn name(&self) -> &'static str {
            "first-line"
        }

        fn rule_ids(&self) -> &'static [RuleId] {
            &[RuleId::LeadingWhitespace]
        }

        fn check(
            &self,
            document: &Document,
            _settings: &LayoutSettings,
        ) -> Result<Vec<Violation>, CheckError> {
            let first = document.leaves().next().ok_or(CheckError::EmptyDocument)??;
            Ok(vec![Violation::new(RuleId::LeadingWhitespace, first.line)])
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = FirstLineRule;
        assert_eq!(rule.name(), "first-line");
        assert_eq!(rule.description(), "");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert_eq!(
            rule.check(&Document::default(), &LayoutSettings::default()),
            Err(CheckError::EmptyDocument)
        );
    }

    #[test]
    fn flatten_errors_convert() {
        let err: CheckError = FlattenError::UnknownKind {
            kind: TokenKind::Unrecognized("x".into()),
            line: 3,
        }
        .into();
        assert_eq!(err.to_string(), "Unknown token kind 'x' at line 3");
    }
}
