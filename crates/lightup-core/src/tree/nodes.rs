//! Type aliases and utilities for host tree nodes
//!
//! These types are built on top of Rowan's generic tree types, parameterized
//! with [`HostLanguage`]. Red nodes (`SyntaxNode`) are cheap views with
//! parent pointers; green nodes (`GreenNode`) are the immutable, shareable
//! storage underneath them.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use super::{HostLanguage, RawKind};

/// A node in the host syntax tree
///
/// Equality compares green storage and offset: views of the same tree are
/// equal, while an edited copy never equals its original.
pub type SyntaxNode = rowan::SyntaxNode<HostLanguage>;

/// A token in the host syntax tree
pub type SyntaxToken = rowan::SyntaxToken<HostLanguage>;

/// Either a node or a token in the host syntax tree
pub type SyntaxElement = rowan::SyntaxElement<HostLanguage>;

/// Owned green child of a green node
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Get the owned green storage of a node
pub fn node_green(node: &SyntaxNode) -> GreenNode {
    node.green().into_owned()
}

/// Get the owned green storage of a token
pub fn token_green(token: &SyntaxToken) -> GreenToken {
    token.green().to_owned()
}

/// Get the owned green storage of a node or token
pub fn element_green(element: &SyntaxElement) -> GreenElement {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(node_green(node)),
        NodeOrToken::Token(token) => NodeOrToken::Token(token_green(token)),
    }
}

/// Collect the green children of a node, tokens included
pub fn green_children(node: &SyntaxNode) -> Vec<GreenElement> {
    node.children_with_tokens()
        .map(|element| element_green(&element))
        .collect()
}

/// Build a new detached root of `kind` from green children
pub fn new_root(kind: RawKind, children: Vec<GreenElement>) -> SyntaxNode {
    SyntaxNode::new_root(GreenNode::new(kind.into(), children))
}

/// Rebuild `node` as a detached root with edited children
///
/// The node keeps its kind. Ancestors are not touched: splicing the result
/// back into the original tree is the caller's business.
pub fn rebuild(node: &SyntaxNode, edit: impl FnOnce(&mut Vec<GreenElement>)) -> SyntaxNode {
    let mut children = green_children(node);
    edit(&mut children);
    new_root(node.kind(), children)
}

/// Create a parentless token
///
/// Rowan tokens always live inside a node, so the token is wrapped in a
/// [`RawKind::DETACHED`] holder. Only the token's green storage is used when
/// it is written into another node.
pub fn detached_token(kind: RawKind, text: &str) -> Option<SyntaxToken> {
    let holder = new_root(
        RawKind::DETACHED,
        vec![NodeOrToken::Token(GreenToken::new(kind.into(), text))],
    );
    holder.first_token()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::GreenNodeBuilder;

    fn build_test_tree() -> SyntaxNode {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(RawKind(10).into());
        builder.token(RawKind(1).into(), "(");
        builder.start_node(RawKind(11).into());
        builder.token(RawKind(2).into(), "int");
        builder.finish_node();
        builder.token(RawKind(3).into(), ")");
        builder.finish_node();
        SyntaxNode::new_root(builder.finish())
    }

    #[test]
    fn test_green_children_include_tokens() {
        let tree = build_test_tree();
        let children = green_children(&tree);
        assert_eq!(children.len(), 3);
        assert!(children[0].as_token().is_some());
        assert!(children[1].as_node().is_some());
    }

    #[test]
    fn test_rebuild_is_copy_on_write() {
        let tree = build_test_tree();
        let edited = rebuild(&tree, |children| {
            children[2] = NodeOrToken::Token(GreenToken::new(RawKind(3).into(), "]"));
        });

        assert_eq!(tree.text().to_string(), "(int)");
        assert_eq!(edited.text().to_string(), "(int]");
        assert_eq!(edited.kind(), RawKind(10));
        assert!(edited.parent().is_none());
    }

    #[test]
    fn test_detached_token() {
        let token = detached_token(RawKind(4), ",").expect("token");
        assert_eq!(token.kind(), RawKind(4));
        assert_eq!(token.text(), ",");
        assert_eq!(token.parent().map(|p| p.kind()), Some(RawKind::DETACHED));
    }
}
