//! Tokenized documents and their serialized form.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::flatten::Leaves;
use crate::token::{Token, TokenKind, TokenList};

/// Errors raised while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// IO error reading the document file.
    #[error("Failed to read document {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The serialized token tree is malformed.
    #[error("Failed to parse token tree: {0}")]
    Json(#[from] serde_json::Error),

    /// A leaf kind carries a child list.
    #[error("Token kind '{kind}' at line {line} cannot own child tokens")]
    ChildrenOnLeaf {
        /// Offending kind.
        kind: TokenKind,
        /// Line of the offending token.
        line: usize,
    },

    /// A token with a zero line number or line span.
    #[error("Token kind '{kind}' has an invalid position (line {line}, span {line_span})")]
    InvalidPosition {
        /// Offending kind.
        kind: TokenKind,
        /// Line number as given.
        line: usize,
        /// Line span as given.
        line_span: usize,
    },
}

/// The token tree of one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Whether the whole document was produced by code generation tooling.
    #[serde(default)]
    pub generated: bool,
    /// Root token list.
    #[serde(default)]
    pub tokens: TokenList,
}

impl Document {
    /// Creates a hand-written document from its root token list.
    #[must_use]
    pub fn new(tokens: TokenList) -> Self {
        Self {
            generated: false,
            tokens,
        }
    }

    /// Marks the whole document as generated.
    #[must_use]
    pub fn with_generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// Loads a document from a JSON token-tree file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parses a document from a JSON token tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the tree is malformed.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(content)?;
        document.validate()?;
        Ok(document)
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks structural invariants of the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first malformed token found in document order.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut pending: Vec<std::slice::Iter<'_, Token>> = vec![self.tokens.iter()];
        while let Some(level) = pending.last_mut() {
            let Some(token) = level.next() else {
                pending.pop();
                continue;
            };
            if token.line == 0 || token.line_span == 0 {
                return Err(DocumentError::InvalidPosition {
                    kind: token.kind.clone(),
                    line: token.line,
                    line_span: token.line_span,
                });
            }
            if !token.children.is_empty() {
                if !token.kind.is_composite() {
                    return Err(DocumentError::ChildrenOnLeaf {
                        kind: token.kind.clone(),
                        line: token.line,
                    });
                }
                pending.push(token.children.iter());
            }
        }
        Ok(())
    }

    /// Returns `true` if the document has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns a fresh cursor over the leaf tokens of the document.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        self.tokens.leaves()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_tree() {
        let json = r#"{
            "tokens": [
                {
                    "kind": "attribute",
                    "line": 1, "start_column": 1, "end_column": 6,
                    "children": [
                        {"kind": "bracket", "text": "[", "line": 1, "start_column": 1, "end_column": 1},
                        {"kind": "token", "text": "Test", "line": 1, "start_column": 2, "end_column": 5},
                        {"kind": "bracket", "text": "]", "line": 1, "start_column": 6, "end_column": 6}
                    ]
                },
                {"kind": "end-of-line", "text": "\n", "line": 1, "start_column": 7, "end_column": 7}
            ]
        }"#;

        let document = Document::from_json(json).unwrap();
        assert!(!document.generated);
        assert_eq!(document.tokens.len(), 2);
        assert_eq!(document.leaves().count(), 4);
        assert_eq!(document.tokens.get(1).unwrap().line_span, 1);
    }

    #[test]
    fn rejects_children_on_leaf_kind() {
        let json = r#"{"tokens": [{
            "kind": "token", "text": "x", "line": 2, "start_column": 1, "end_column": 1,
            "children": [{"kind": "token", "text": "y", "line": 2, "start_column": 2, "end_column": 2}]
        }]}"#;

        let err = Document::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::ChildrenOnLeaf { kind: TokenKind::Token, line: 2 }
        ));
    }

    #[test]
    fn rejects_zero_line_number() {
        let json = r#"{"tokens": [{"kind": "token", "text": "x", "line": 0, "start_column": 1, "end_column": 1}]}"#;
        let err = Document::from_json(json).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidPosition { line: 0, .. }));
    }

    #[test]
    fn json_round_trip_preserves_generated_marker() {
        let document = Document::new(vec![Token::new(TokenKind::Token, "x", 1, 1, 1)].into())
            .with_generated(true);
        let restored = Document::from_json(&document.to_json().unwrap()).unwrap();
        assert_eq!(restored, document);
    }
}
