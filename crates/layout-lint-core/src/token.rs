//! Token model for tokenized source documents.
//!
//! Tokens are produced by an upstream parser and are read-only for the
//! linter. Some kinds (attributes, generic types, XML doc headers, ...) are
//! containers that own a nested list of child tokens; every other kind is a
//! leaf carrying the actual source text and position.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::flatten::Leaves;

/// Kind of a source token.
///
/// Names are serialized in kebab-case (e.g. `end-of-line`). Kind names that
/// this taxonomy does not know are kept as [`TokenKind::Unrecognized`] so that
/// the flattener can report them instead of the document failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenKind {
    /// Opening or closing bracket, brace, or parenthesis.
    Bracket,
    /// `#if` / `#elif` / `#else` / `#endif` style directive.
    ConditionalCompilationDirective,
    /// Numeric literal.
    Number,
    /// Operator symbol.
    OperatorSymbol,
    /// Preprocessor directive other than conditional compilation and regions.
    PreprocessorDirective,
    /// `#region` / `#endregion` style directive.
    RegionDirective,
    /// Any other plain token: keywords, identifiers, literals.
    Token,
    /// Run of spaces or tabs.
    Whitespace,
    /// Line terminator.
    EndOfLine,
    /// Comment that runs to the end of its line.
    SingleLineComment,
    /// Delimited comment that may span several lines.
    MultiLineComment,
    /// One line of an XML documentation header.
    XmlHeaderLine,
    /// Attribute section (container).
    Attribute,
    /// Constructor constraint in a generic declaration (container).
    ConstructorConstraint,
    /// Generic type reference (container).
    GenericType,
    /// Type reference (container).
    Type,
    /// XML documentation header (container of header lines).
    XmlHeader,
    /// A kind name emitted by the producer that this taxonomy does not know.
    Unrecognized(String),
}

impl TokenKind {
    /// Returns `true` for kinds that own a nested child token list.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        match self {
            Self::Attribute
            | Self::ConstructorConstraint
            | Self::GenericType
            | Self::Type
            | Self::XmlHeader => true,
            Self::Bracket
            | Self::ConditionalCompilationDirective
            | Self::Number
            | Self::OperatorSymbol
            | Self::PreprocessorDirective
            | Self::RegionDirective
            | Self::Token
            | Self::Whitespace
            | Self::EndOfLine
            | Self::SingleLineComment
            | Self::MultiLineComment
            | Self::XmlHeaderLine
            | Self::Unrecognized(_) => false,
        }
    }

    /// Returns `true` for kinds that may be yielded by the flattener.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        match self {
            Self::Bracket
            | Self::ConditionalCompilationDirective
            | Self::Number
            | Self::OperatorSymbol
            | Self::PreprocessorDirective
            | Self::RegionDirective
            | Self::Token
            | Self::Whitespace
            | Self::EndOfLine
            | Self::SingleLineComment
            | Self::MultiLineComment
            | Self::XmlHeaderLine => true,
            Self::Attribute
            | Self::ConstructorConstraint
            | Self::GenericType
            | Self::Type
            | Self::XmlHeader
            | Self::Unrecognized(_) => false,
        }
    }

    /// Returns `true` for whitespace and line terminators.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace | Self::EndOfLine)
    }

    /// Returns `true` for kinds whose text consumes the rest of a physical line.
    #[must_use]
    pub fn eats_line(&self) -> bool {
        matches!(
            self,
            Self::SingleLineComment | Self::PreprocessorDirective | Self::XmlHeaderLine
        )
    }

    /// Returns the kebab-case name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bracket => "bracket",
            Self::ConditionalCompilationDirective => "conditional-compilation-directive",
            Self::Number => "number",
            Self::OperatorSymbol => "operator-symbol",
            Self::PreprocessorDirective => "preprocessor-directive",
            Self::RegionDirective => "region-directive",
            Self::Token => "token",
            Self::Whitespace => "whitespace",
            Self::EndOfLine => "end-of-line",
            Self::SingleLineComment => "single-line-comment",
            Self::MultiLineComment => "multi-line-comment",
            Self::XmlHeaderLine => "xml-header-line",
            Self::Attribute => "attribute",
            Self::ConstructorConstraint => "constructor-constraint",
            Self::GenericType => "generic-type",
            Self::Type => "type",
            Self::XmlHeader => "xml-header",
            Self::Unrecognized(name) => name,
        }
    }
}

impl From<String> for TokenKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "bracket" => Self::Bracket,
            "conditional-compilation-directive" => Self::ConditionalCompilationDirective,
            "number" => Self::Number,
            "operator-symbol" => Self::OperatorSymbol,
            "preprocessor-directive" => Self::PreprocessorDirective,
            "region-directive" => Self::RegionDirective,
            "token" => Self::Token,
            "whitespace" => Self::Whitespace,
            "end-of-line" => Self::EndOfLine,
            "single-line-comment" => Self::SingleLineComment,
            "multi-line-comment" => Self::MultiLineComment,
            "xml-header-line" => Self::XmlHeaderLine,
            "attribute" => Self::Attribute,
            "constructor-constraint" => Self::ConstructorConstraint,
            "generic-type" => Self::GenericType,
            "type" => Self::Type,
            "xml-header" => Self::XmlHeader,
            _ => Self::Unrecognized(name),
        }
    }
}

impl From<TokenKind> for String {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Unrecognized(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single source token.
///
/// Columns are 1-indexed. `end_column` is the column of the token's last
/// character on its last line, so a token `abc` starting at column 1 ends at
/// column 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Kind of this token.
    pub kind: TokenKind,
    /// Raw source text.
    #[serde(default)]
    pub text: String,
    /// Line number of the first character (1-indexed).
    pub line: usize,
    /// Column of the first character (1-indexed).
    pub start_column: usize,
    /// Column of the last character on the token's last line (1-indexed).
    pub end_column: usize,
    /// Number of physical lines the token covers.
    #[serde(default = "default_line_span")]
    pub line_span: usize,
    /// Whether the token was produced by code generation tooling.
    #[serde(default)]
    pub generated: bool,
    /// Nested tokens owned by a composite token.
    #[serde(default, skip_serializing_if = "TokenList::is_empty")]
    pub children: TokenList,
}

fn default_line_span() -> usize {
    1
}

impl Token {
    /// Creates a leaf token covering a single line.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: usize,
        start_column: usize,
        end_column: usize,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            start_column,
            end_column,
            line_span: 1,
            generated: false,
            children: TokenList::new(),
        }
    }

    /// Creates a composite token owning `children`.
    ///
    /// Position information is taken from the first and last child leaf.
    #[must_use]
    pub fn composite(kind: TokenKind, children: TokenList) -> Self {
        let first = children.first_leaf();
        let last = children.last_leaf();
        let line = first.map_or(1, |t| t.line);
        let start_column = first.map_or(1, |t| t.start_column);
        let end_line = last.map_or(line, Token::end_line);
        let end_column = last.map_or(start_column, |t| t.end_column);
        Self {
            kind,
            text: String::new(),
            line,
            start_column,
            end_column,
            line_span: end_line.saturating_sub(line) + 1,
            generated: false,
            children,
        }
    }

    /// Sets the number of physical lines covered by this token.
    #[must_use]
    pub fn with_line_span(mut self, line_span: usize) -> Self {
        self.line_span = line_span;
        self
    }

    /// Marks this token as generated.
    #[must_use]
    pub fn with_generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// Line number of the token's last character.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.line + self.line_span.saturating_sub(1)
    }

    /// Returns the child list of this token (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &TokenList {
        &self.children
    }

    /// Returns `true` if this token should be descended into by the flattener.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.kind.is_composite() && !self.children.is_empty()
    }
}

/// An ordered list of tokens at one nesting level.
///
/// Positions are plain indices, so predecessor and successor lookups are
/// constant time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenList(Vec<Token>);

impl TokenList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a token.
    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    /// Number of tokens at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.0.get(index)
    }

    /// First token at this level.
    #[must_use]
    pub fn first(&self) -> Option<&Token> {
        self.0.first()
    }

    /// Last token at this level.
    #[must_use]
    pub fn last(&self) -> Option<&Token> {
        self.0.last()
    }

    /// Index of the token before `index`, if any.
    #[must_use]
    pub fn predecessor(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).filter(|i| *i < self.0.len())
    }

    /// Index of the token after `index`, if any.
    #[must_use]
    pub fn successor(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.0.len()).then_some(next)
    }

    /// Iterates over the tokens at this level without descending.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// Returns a fresh depth-first cursor over the leaf tokens of this list.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// First leaf reached by descending through leading composites.
    fn first_leaf(&self) -> Option<&Token> {
        let mut token = self.first()?;
        while token.has_children() {
            token = token.children.first()?;
        }
        Some(token)
    }

    /// Last leaf reached by descending through trailing composites.
    fn last_leaf(&self) -> Option<&Token> {
        let mut token = self.last()?;
        while token.has_children() {
            token = token.children.last()?;
        }
        Some(token)
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits token text into one slice per physical line.
///
/// `\r\n`, `\n` and a bare `\r` each end a line; terminators are not part of
/// the returned slices.
pub fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(|c| c == '\r' || c == '\n') {
            Some(end) => {
                let terminator = if current[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[end + terminator..]);
                Some(&current[..end])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_lines_split_on_every_terminator() {
        let lines: Vec<&str> = physical_lines("/* a\r\n b \n c\r */").collect();
        assert_eq!(lines, ["/* a", " b ", " c", " */"]);
        assert_eq!(physical_lines("/* x */").count(), 1);
        assert_eq!(physical_lines("x\n").collect::<Vec<_>>(), ["x", ""]);
    }

    #[test]
    fn kind_names_round_trip_through_serde() {
        let kind: TokenKind = serde_json::from_str("\"end-of-line\"").unwrap();
        assert_eq!(kind, TokenKind::EndOfLine);
        assert_eq!(
            serde_json::to_string(&TokenKind::GenericType).unwrap(),
            "\"generic-type\""
        );
    }

    #[test]
    fn unknown_kind_name_is_preserved() {
        let kind: TokenKind = serde_json::from_str("\"lambda\"").unwrap();
        assert_eq!(kind, TokenKind::Unrecognized("lambda".to_string()));
        assert_eq!(kind.to_string(), "lambda");
        assert!(!kind.is_leaf());
        assert!(!kind.is_composite());
    }

    #[test]
    fn eat_line_kinds() {
        assert!(TokenKind::SingleLineComment.eats_line());
        assert!(TokenKind::PreprocessorDirective.eats_line());
        assert!(TokenKind::XmlHeaderLine.eats_line());
        assert!(!TokenKind::MultiLineComment.eats_line());
        assert!(!TokenKind::Token.eats_line());
    }

    #[test]
    fn neighbours_are_index_based() {
        let list: TokenList = vec![
            Token::new(TokenKind::Token, "a", 1, 1, 1),
            Token::new(TokenKind::Token, "b", 1, 2, 2),
        ]
        .into();
        assert_eq!(list.predecessor(0), None);
        assert_eq!(list.predecessor(1), Some(0));
        assert_eq!(list.successor(0), Some(1));
        assert_eq!(list.successor(1), None);
    }

    #[test]
    fn composite_takes_position_from_children() {
        let children: TokenList = vec![
            Token::new(TokenKind::Bracket, "[", 3, 5, 5),
            Token::new(TokenKind::Token, "Test", 3, 6, 9),
            Token::new(TokenKind::Bracket, "]", 3, 10, 10),
        ]
        .into();
        let attribute = Token::composite(TokenKind::Attribute, children);
        assert_eq!(attribute.line, 3);
        assert_eq!(attribute.start_column, 5);
        assert_eq!(attribute.end_column, 10);
        assert_eq!(attribute.line_span, 1);
        assert!(attribute.has_children());
    }

    #[test]
    fn end_line_accounts_for_span() {
        let comment =
            Token::new(TokenKind::MultiLineComment, "/*\n\n*/", 4, 1, 2).with_line_span(3);
        assert_eq!(comment.end_line(), 6);
    }
}
