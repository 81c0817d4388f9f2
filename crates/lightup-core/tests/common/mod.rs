//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use lightup_core::syntax::{self, catalogs};
use lightup_core::tree::NodeOrToken;
use lightup_core::{
    LightupRegistry, RawKind, StaticCatalog, SyntaxBuilder, SyntaxCatalog, SyntaxElement,
    SyntaxNode,
};

pub fn registry(catalog: StaticCatalog) -> LightupRegistry {
    LightupRegistry::new(Arc::new(catalog), syntax::schema())
}

/// One registry per bundled host version, oldest first
pub fn all_registries() -> anyhow::Result<Vec<LightupRegistry>> {
    Ok(catalogs::all()?.into_iter().map(registry).collect())
}

fn push_element(
    builder: &mut SyntaxBuilder<'_>,
    keyword: &str,
    name: &str,
) -> anyhow::Result<()> {
    builder
        .start_node("TupleElement")?
        .start_node("PredefinedType")?
        .fixed_token(keyword)?
        .finish_node();
    builder
        .token("Whitespace", " ")?
        .token("IdentifierToken", name)?
        .finish_node();
    Ok(())
}

/// `(int a, string b)` for `[("IntKeyword", "a"), ("StringKeyword", "b")]`
pub fn tuple_type(
    catalog: &dyn SyntaxCatalog,
    elements: &[(&str, &str)],
) -> anyhow::Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    builder
        .start_node("TupleType")?
        .fixed_token("OpenParenToken")?
        .start_node("TupleElementList")?;
    for (index, (keyword, name)) in elements.iter().enumerate() {
        if index > 0 {
            builder.fixed_token("CommaToken")?.token("Whitespace", " ")?;
        }
        push_element(&mut builder, keyword, name)?;
    }
    builder
        .finish_node()
        .fixed_token("CloseParenToken")?
        .finish_node();
    Ok(builder.finish())
}

pub fn tuple_element(
    catalog: &dyn SyntaxCatalog,
    keyword: &str,
    name: &str,
) -> anyhow::Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    push_element(&mut builder, keyword, name)?;
    Ok(builder.finish())
}

/// `int` or `string`
pub fn predefined_type(catalog: &dyn SyntaxCatalog, keyword: &str) -> anyhow::Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    builder
        .start_node("PredefinedType")?
        .fixed_token(keyword)?
        .finish_node();
    Ok(builder.finish())
}

fn short_name(catalog: &dyn SyntaxCatalog, raw: RawKind) -> String {
    catalog
        .kind(raw)
        .map(|info| info.name.clone())
        .unwrap_or_else(|| raw.to_string())
}

fn write_element(
    catalog: &dyn SyntaxCatalog,
    element: SyntaxElement,
    depth: usize,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    match element {
        NodeOrToken::Node(node) => {
            out.push_str(&format!("{indent}{}\n", short_name(catalog, node.kind())));
            for child in node.children_with_tokens() {
                write_element(catalog, child, depth + 1, out);
            }
        }
        NodeOrToken::Token(token) => {
            out.push_str(&format!(
                "{indent}{} {:?}\n",
                short_name(catalog, token.kind()),
                token.text()
            ));
        }
    }
}

/// Indented tree dump using catalog kind names
pub fn dump(catalog: &dyn SyntaxCatalog, node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_element(catalog, NodeOrToken::Node(node.clone()), 0, &mut out);
    out.trim_end().to_string()
}
