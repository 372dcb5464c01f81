//! Position-tracking construction of token trees.
//!
//! Producers append tokens by kind and text; the builder assigns line and
//! column numbers as it goes, so a tree can be written down in source order
//! without computing positions by hand.
//!
//! ```ignore
//! let mut builder = DocumentBuilder::new();
//! builder.push(TokenKind::Token, "int").push(TokenKind::Whitespace, " ");
//! builder.open(TokenKind::GenericType)?;
//! builder.push(TokenKind::Token, "List").push(TokenKind::OperatorSymbol, "<");
//! builder.close()?;
//! builder.end_of_line();
//! let document = builder.finish()?;
//! ```

use crate::document::Document;
use crate::token::{physical_lines, Token, TokenKind, TokenList};

/// Errors raised by [`DocumentBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// `open` was called with a kind that cannot own children.
    #[error("Token kind '{0}' cannot own child tokens")]
    NotComposite(TokenKind),

    /// `close` was called with no composite open.
    #[error("No composite token is open")]
    NothingOpen,

    /// `finish` was called while composites were still open.
    #[error("{0} composite token(s) left open")]
    Unclosed(usize),
}

#[derive(Debug)]
struct OpenComposite {
    kind: TokenKind,
    generated: bool,
    children: TokenList,
}

/// Builds a [`Document`] while tracking source positions.
#[derive(Debug)]
pub struct DocumentBuilder {
    root: TokenList,
    open: Vec<OpenComposite>,
    line: usize,
    column: usize,
    generated: bool,
    document_generated: bool,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a builder positioned at line 1, column 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TokenList::new(),
            open: Vec::new(),
            line: 1,
            column: 1,
            generated: false,
            document_generated: false,
        }
    }

    /// Marks subsequently pushed tokens as generated (or hand-written).
    pub fn generated(&mut self, generated: bool) -> &mut Self {
        self.generated = generated;
        self
    }

    /// Marks the whole document as generated.
    pub fn document_generated(&mut self, generated: bool) -> &mut Self {
        self.document_generated = generated;
        self
    }

    /// Appends a leaf token, advancing the position past its text.
    ///
    /// Text containing line terminators spans several lines; the position
    /// continues after the last line.
    pub fn push(&mut self, kind: TokenKind, text: &str) -> &mut Self {
        if kind == TokenKind::EndOfLine {
            return self.push_end_of_line(text);
        }
        let line = self.line;
        let start_column = self.column;
        let mut lines = physical_lines(text);
        let first_width = lines.next().map_or(0, |l| l.chars().count());
        let mut line_span = 1;
        let mut last_width = first_width;
        for rest in lines {
            line_span += 1;
            last_width = rest.chars().count();
        }

        let end_column = if line_span == 1 {
            start_column + first_width.saturating_sub(1)
        } else {
            last_width.max(1)
        };

        if line_span == 1 {
            self.column += first_width;
        } else {
            self.line += line_span - 1;
            self.column = last_width + 1;
        }

        let token = Token::new(kind, text, line, start_column, end_column)
            .with_line_span(line_span)
            .with_generated(self.generated);
        self.current_list().push(token);
        self
    }

    /// Appends a `\n` line terminator.
    pub fn end_of_line(&mut self) -> &mut Self {
        self.push_end_of_line("\n")
    }

    /// Appends a line terminator with explicit text (e.g. `\r\n`).
    pub fn push_end_of_line(&mut self, text: &str) -> &mut Self {
        let token = Token::new(
            TokenKind::EndOfLine,
            text,
            self.line,
            self.column,
            self.column + text.chars().count().saturating_sub(1),
        )
        .with_generated(self.generated);
        self.current_list().push(token);
        self.line += 1;
        self.column = 1;
        self
    }

    /// Opens a composite token; subsequent tokens become its children.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotComposite`] for kinds that cannot own children.
    pub fn open(&mut self, kind: TokenKind) -> Result<&mut Self, BuildError> {
        if !kind.is_composite() {
            return Err(BuildError::NotComposite(kind));
        }
        self.open.push(OpenComposite {
            kind,
            generated: self.generated,
            children: TokenList::new(),
        });
        Ok(self)
    }

    /// Closes the innermost open composite token.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NothingOpen`] if no composite is open.
    pub fn close(&mut self) -> Result<&mut Self, BuildError> {
        let composite = self.open.pop().ok_or(BuildError::NothingOpen)?;
        let token = Token::composite(composite.kind, composite.children)
            .with_generated(composite.generated);
        self.current_list().push(token);
        Ok(self)
    }

    /// Finishes the document.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Unclosed`] if composites are still open.
    pub fn finish(self) -> Result<Document, BuildError> {
        if !self.open.is_empty() {
            return Err(BuildError::Unclosed(self.open.len()));
        }
        Ok(Document::new(self.root).with_generated(self.document_generated))
    }

    fn current_list(&mut self) -> &mut TokenList {
        match self.open.last_mut() {
            Some(composite) => &mut composite.children,
            None => &mut self.root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_columns_and_lines() {
        let mut builder = DocumentBuilder::new();
        builder
            .push(TokenKind::Token, "int")
            .push(TokenKind::Whitespace, " ")
            .push(TokenKind::Token, "x")
            .push(TokenKind::OperatorSymbol, ";")
            .end_of_line()
            .push(TokenKind::Token, "y");
        let document = builder.finish().unwrap();

        let tokens: Vec<&Token> = document.leaves().map(Result::unwrap).collect();
        assert_eq!(
            (tokens[0].line, tokens[0].start_column, tokens[0].end_column),
            (1, 1, 3)
        );
        assert_eq!((tokens[2].start_column, tokens[2].end_column), (5, 5));
        assert_eq!(tokens[4].kind, TokenKind::EndOfLine);
        assert_eq!(tokens[4].start_column, 7);
        assert_eq!((tokens[5].line, tokens[5].start_column), (2, 1));
    }

    #[test]
    fn multi_line_text_spans_lines() {
        let mut builder = DocumentBuilder::new();
        builder
            .push(TokenKind::Whitespace, "  ")
            .push(TokenKind::MultiLineComment, "/* a\n   b\n */")
            .push(TokenKind::Token, "z");
        let document = builder.finish().unwrap();

        let comment = document.tokens.get(1).unwrap();
        assert_eq!(comment.line, 1);
        assert_eq!(comment.start_column, 3);
        assert_eq!(comment.line_span, 3);
        assert_eq!(comment.end_line(), 3);
        assert_eq!(comment.end_column, 3);

        let after = document.tokens.get(2).unwrap();
        assert_eq!((after.line, after.start_column), (3, 4));
    }

    #[test]
    fn composites_nest() {
        let mut builder = DocumentBuilder::new();
        builder.open(TokenKind::Attribute).unwrap();
        builder.push(TokenKind::Bracket, "[");
        builder.open(TokenKind::Type).unwrap();
        builder.push(TokenKind::Token, "Obsolete");
        builder.close().unwrap();
        builder.push(TokenKind::Bracket, "]");
        builder.close().unwrap();
        let document = builder.finish().unwrap();

        assert_eq!(document.tokens.len(), 1);
        let attribute = document.tokens.first().unwrap();
        assert_eq!(attribute.kind, TokenKind::Attribute);
        assert_eq!((attribute.start_column, attribute.end_column), (1, 10));
        assert_eq!(document.leaves().count(), 3);
    }

    #[test]
    fn rejects_misuse() {
        let mut builder = DocumentBuilder::new();
        assert_eq!(
            builder.open(TokenKind::Whitespace).unwrap_err(),
            BuildError::NotComposite(TokenKind::Whitespace)
        );
        assert_eq!(builder.close().unwrap_err(), BuildError::NothingOpen);
        builder.open(TokenKind::XmlHeader).unwrap();
        assert_eq!(builder.finish().unwrap_err(), BuildError::Unclosed(1));
    }

    #[test]
    fn generated_regions_mark_tokens() {
        let mut builder = DocumentBuilder::new();
        builder.generated(true).push(TokenKind::Token, "a");
        builder.generated(false).push(TokenKind::Token, "b");
        let document = builder.finish().unwrap();
        assert!(document.tokens.get(0).unwrap().generated);
        assert!(!document.tokens.get(1).unwrap().generated);
        assert!(!document.generated);
    }

    #[test]
    fn document_marker_is_independent_of_token_marker() {
        let mut builder = DocumentBuilder::new();
        builder.document_generated(true).push(TokenKind::Token, "a");
        let document = builder.finish().unwrap();
        assert!(document.generated);
        assert!(!document.tokens.get(0).unwrap().generated);
    }
}
