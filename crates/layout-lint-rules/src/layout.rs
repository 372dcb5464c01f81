//! Layout checks over the flattened token stream of a document.
//!
//! # Rules
//!
//! | Code | Name | Checked on |
//! |------|------|------------|
//! | LL001 | `line-too-long` | every leaf; each line of a multi-line comment |
//! | LL002 | `trailing-whitespace` | whitespace before a line end; eat-line tokens; multi-line comments |
//! | LL003 | `trailing-blank-lines` | the whitespace run at the end of the root token list |
//! | LL004 | `leading-whitespace` | the first leaf |
//! | LL005 | `missing-trailing-newline` | the last leaf |
//!
//! # Configuration
//!
//! - `include_generated`: also check generated tokens and documents (default: false)
//! - `maximum_line_length`: longest allowed line in characters (default: 120)
//!
//! Findings are keyed by `(rule, line)`. A long line is seen by every token
//! that ends past the limit, but is reported once.

use indexmap::IndexMap;
use layout_lint_core::{
    physical_lines, CheckError, Document, LayoutSettings, Rule, RuleId, Token, TokenKind,
    TokenList, Violation,
};
use tracing::debug;

use crate::comment::{has_trailing_whitespace, width};

/// Rule name for the layout checker.
pub const NAME: &str = "layout";

/// Checks the physical layout of a tokenized document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRules;

impl LayoutRules {
    /// Creates the checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Analyzes one document and returns its unique `(rule, line)` findings.
    ///
    /// A generated document is skipped entirely unless generated code is
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::EmptyDocument`] for a document without tokens and
    /// [`CheckError::Flatten`] if the token tree is inconsistent.
    pub fn analyze_document(
        &self,
        document: &Document,
        settings: &LayoutSettings,
    ) -> Result<Vec<Violation>, CheckError> {
        if document.is_empty() {
            return Err(CheckError::EmptyDocument);
        }
        if settings.excludes(document.generated) {
            debug!("Skipping generated document");
            return Ok(Vec::new());
        }

        let mut pass = LayoutPass::new(settings);
        let mut previous: Option<&Token> = None;

        for token in document.leaves() {
            let token = token?;
            if previous.is_none() {
                pass.check_leading_whitespace(token);
            }
            pass.check_trailing_whitespace(previous, token);
            pass.check_line_length(token);
            previous = Some(token);
        }

        let last = previous.ok_or(CheckError::EmptyDocument)?;
        pass.check_trailing_blank_lines(&document.tokens);
        pass.check_trailing_newline(last);

        let violations = pass.finish();
        debug!("Layout check found {} violation(s)", violations.len());
        Ok(violations)
    }
}

impl Rule for LayoutRules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks line length, trailing whitespace, and blank lines at file boundaries"
    }

    fn rule_ids(&self) -> &'static [RuleId] {
        &RuleId::ALL
    }

    fn check(
        &self,
        document: &Document,
        settings: &LayoutSettings,
    ) -> Result<Vec<Violation>, CheckError> {
        self.analyze_document(document, settings)
    }
}

/// Call-local state of one check.
struct LayoutPass<'s> {
    settings: &'s LayoutSettings,
    found: IndexMap<(RuleId, usize), Violation>,
}

impl<'s> LayoutPass<'s> {
    fn new(settings: &'s LayoutSettings) -> Self {
        Self {
            settings,
            found: IndexMap::new(),
        }
    }

    fn report(&mut self, violation: Violation) {
        self.found
            .entry((violation.rule, violation.line))
            .or_insert(violation);
    }

    fn finish(self) -> Vec<Violation> {
        self.found.into_values().collect()
    }

    fn skips(&self, token: &Token) -> bool {
        self.settings.excludes(token.generated)
    }

    fn check_leading_whitespace(&mut self, first: &Token) {
        if self.skips(first) {
            return;
        }
        if first.kind.is_whitespace() {
            self.report(Violation::new(RuleId::LeadingWhitespace, first.line));
        }
    }

    fn check_trailing_whitespace(&mut self, previous: Option<&Token>, token: &Token) {
        if self.skips(token) {
            return;
        }

        if token.kind == TokenKind::EndOfLine
            && previous.is_some_and(|p| p.kind == TokenKind::Whitespace)
        {
            self.report(Violation::new(RuleId::TrailingWhitespace, token.line));
        }

        if token.kind.eats_line() && has_trailing_whitespace(&token.text) {
            self.report(Violation::new(RuleId::TrailingWhitespace, token.line));
        }

        if token.kind == TokenKind::MultiLineComment {
            for (index, line) in physical_lines(&token.text).enumerate() {
                if has_trailing_whitespace(line) {
                    self.report(Violation::new(RuleId::TrailingWhitespace, token.line + index));
                }
            }
        }
    }

    fn check_line_length(&mut self, token: &Token) {
        if self.skips(token) {
            return;
        }
        let maximum = self.settings.maximum_line_length.get();

        if token.kind == TokenKind::MultiLineComment {
            for (index, line) in physical_lines(&token.text).enumerate() {
                let offset = if index == 0 {
                    token.start_column.saturating_sub(1)
                } else {
                    0
                };
                if offset + width(line) > maximum {
                    let violation = Violation::new(RuleId::LineTooLong, token.line + index);
                    self.report(violation.with_context(maximum));
                }
            }
            return;
        }

        // A line terminator closes the line: its length excludes the terminator.
        let length = if token.kind == TokenKind::EndOfLine {
            token.start_column.saturating_sub(1)
        } else {
            token.end_column
        };
        if length > maximum {
            let violation = Violation::new(RuleId::LineTooLong, token.end_line());
            self.report(violation.with_context(maximum));
        }
    }

    /// Walks the root list backwards over its trailing whitespace run.
    fn check_trailing_blank_lines(&mut self, tokens: &TokenList) {
        let mut last_line: Option<usize> = None;
        let mut index = tokens.len().checked_sub(1);

        while let Some(token) = index.and_then(|i| tokens.get(i)) {
            if !token.kind.is_whitespace() || self.skips(token) {
                return;
            }
            if token.kind == TokenKind::EndOfLine {
                match last_line {
                    None => last_line = Some(token.line),
                    Some(last) if last > token.line => {
                        self.report(Violation::new(RuleId::TrailingBlankLines, last));
                    }
                    Some(_) => {}
                }
            }
            index = index.and_then(|i| tokens.predecessor(i));
        }
    }

    fn check_trailing_newline(&mut self, last: &Token) {
        if self.skips(last) {
            return;
        }
        if last.kind != TokenKind::EndOfLine {
            self.report(Violation::new(RuleId::MissingTrailingNewline, last.line));
        }
    }
}
