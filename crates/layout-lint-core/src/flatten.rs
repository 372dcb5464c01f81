//! Depth-first flattening of a token tree into its leaf tokens.
//!
//! Layout checks need one position-ordered stream of leaves, but the token
//! list is a tree: composite tokens own nested child lists. [`Leaves`] walks
//! that tree with an explicit stack of resume anchors, so nesting depth never
//! grows the call stack.

use crate::token::{Token, TokenKind, TokenList};

/// Internal-consistency faults raised while flattening.
///
/// These mean the tree builder and the token taxonomy disagree; they are
/// defects, not analysis findings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// A composite kind was reached without any children to descend into.
    #[error("Unexpected token kind '{kind}' at line {line}: container tokens must not be leaves")]
    Classification {
        /// Offending kind.
        kind: TokenKind,
        /// Line of the offending token.
        line: usize,
    },

    /// A kind outside both the leaf and the composite sets.
    #[error("Unknown token kind '{kind}' at line {line}")]
    UnknownKind {
        /// Offending kind.
        kind: TokenKind,
        /// Line of the offending token.
        line: usize,
    },
}

/// A position inside one token list.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    list: &'a TokenList,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn token(self) -> Option<&'a Token> {
        self.list.get(self.index)
    }

    fn successor(self) -> Option<Self> {
        self.list.successor(self.index).map(|index| Self {
            list: self.list,
            index,
        })
    }
}

/// Iterator over the leaf tokens of a token tree, in document order.
///
/// Composite tokens are never yielded; their children are visited in their
/// place. Each call to [`TokenList::leaves`] creates an independent cursor
/// over the same immutable tree. After an error is yielded the iterator is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    current: Option<Cursor<'a>>,
    anchors: Vec<Cursor<'a>>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        let current = (!tokens.is_empty()).then_some(Cursor {
            list: tokens,
            index: 0,
        });
        Self {
            current,
            anchors: Vec::new(),
        }
    }

    /// Moves past `cursor`: to its sibling, or to the sibling of the nearest
    /// enclosing composite that still has one.
    fn advance(&mut self, cursor: Cursor<'a>) -> Option<Cursor<'a>> {
        if let Some(next) = cursor.successor() {
            return Some(next);
        }
        while let Some(anchor) = self.anchors.pop() {
            if let Some(next) = anchor.successor() {
                return Some(next);
            }
        }
        None
    }

    fn fail(&mut self, error: FlattenError) -> Option<Result<&'a Token, FlattenError>> {
        self.current = None;
        self.anchors.clear();
        Some(Err(error))
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Result<&'a Token, FlattenError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut cursor = self.current.take()?;
        let mut token = cursor.token()?;

        while token.has_children() {
            self.anchors.push(cursor);
            cursor = Cursor {
                list: token.children(),
                index: 0,
            };
            token = cursor.token()?;
        }

        if token.kind.is_leaf() {
            self.current = self.advance(cursor);
            return Some(Ok(token));
        }

        let kind = token.kind.clone();
        let line = token.line;
        if kind.is_composite() {
            self.fail(FlattenError::Classification { kind, line })
        } else {
            self.fail(FlattenError::UnknownKind { kind, line })
        }
    }
}

impl std::iter::FusedIterator for Leaves<'_> {}
