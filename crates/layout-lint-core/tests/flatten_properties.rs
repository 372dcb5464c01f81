//! Property tests for the leaf flattener over arbitrary token trees.

use layout_lint_core::{Token, TokenKind, TokenList};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Leaf(String),
    Node(TokenKind, Vec<Shape>),
}

fn composite_kind() -> impl Strategy<Value = TokenKind> {
    prop_oneof![
        Just(TokenKind::Attribute),
        Just(TokenKind::ConstructorConstraint),
        Just(TokenKind::GenericType),
        Just(TokenKind::Type),
        Just(TokenKind::XmlHeader),
    ]
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = "[a-z]{1,3}".prop_map(Shape::Leaf);
    leaf.prop_recursive(6, 64, 5, |inner| {
        (composite_kind(), prop::collection::vec(inner, 1..5))
            .prop_map(|(kind, children)| Shape::Node(kind, children))
    })
}

fn build(shapes: &[Shape]) -> TokenList {
    shapes
        .iter()
        .map(|shape| match shape {
            Shape::Leaf(text) => Token::new(TokenKind::Token, text.as_str(), 1, 1, text.len()),
            Shape::Node(kind, children) => Token::composite(kind.clone(), build(children)),
        })
        .collect()
}

/// Reference pre-order traversal, children before following siblings.
fn expected(shapes: &[Shape], out: &mut Vec<String>) {
    for shape in shapes {
        match shape {
            Shape::Leaf(text) => out.push(text.clone()),
            Shape::Node(_, children) => expected(children, out),
        }
    }
}

fn flatten(tokens: &TokenList) -> Vec<String> {
    tokens
        .leaves()
        .map(|token| token.map(|t| t.text.clone()))
        .collect::<Result<_, _>>()
        .expect("well-formed tree must flatten")
}

proptest! {
    #[test]
    fn yields_leaves_in_document_order(shapes in prop::collection::vec(shape(), 0..8)) {
        let tokens = build(&shapes);
        let mut reference = Vec::new();
        expected(&shapes, &mut reference);
        prop_assert_eq!(flatten(&tokens), reference);
    }

    #[test]
    fn traversals_are_restartable(shapes in prop::collection::vec(shape(), 0..8)) {
        let tokens = build(&shapes);
        prop_assert_eq!(flatten(&tokens), flatten(&tokens));
    }

    #[test]
    fn never_yields_containers(shapes in prop::collection::vec(shape(), 0..8)) {
        let tokens = build(&shapes);
        for token in tokens.leaves() {
            let token = token.expect("well-formed tree must flatten");
            prop_assert!(token.kind.is_leaf());
            prop_assert!(!token.has_children());
        }
    }
}
