//! Tree fixtures built against the bundled catalogs

use std::sync::Arc;

use super::{catalogs, schema};
use crate::catalog::{StaticCatalog, SyntaxCatalog};
use crate::registry::LightupRegistry;
use crate::result::Result;
use crate::tree::{SyntaxBuilder, SyntaxNode};

pub(crate) fn registry(catalog: StaticCatalog) -> LightupRegistry {
    LightupRegistry::new(Arc::new(catalog), schema())
}

pub(crate) fn registry_6_0() -> LightupRegistry {
    registry(catalogs::csharp_6_0().expect("bundled 6.0 catalog"))
}

pub(crate) fn registry_7_0() -> LightupRegistry {
    registry(catalogs::csharp_7_0().expect("bundled 7.0 catalog"))
}

pub(crate) fn registry_7_3() -> LightupRegistry {
    registry(catalogs::csharp_7_3().expect("bundled 7.3 catalog"))
}

fn push_element(builder: &mut SyntaxBuilder<'_>, keyword: &str, name: &str) -> Result<()> {
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
pub(crate) fn tuple_type(
    catalog: &dyn SyntaxCatalog,
    elements: &[(&str, &str)],
) -> Result<SyntaxNode> {
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

/// Standalone `int c`
pub(crate) fn tuple_element(
    catalog: &dyn SyntaxCatalog,
    keyword: &str,
    name: &str,
) -> Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    push_element(&mut builder, keyword, name)?;
    Ok(builder.finish())
}

/// `int` or `string`
pub(crate) fn predefined_type(catalog: &dyn SyntaxCatalog, keyword: &str) -> Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    builder
        .start_node("PredefinedType")?
        .fixed_token(keyword)?
        .finish_node();
    Ok(builder.finish())
}

/// `Foo`
pub(crate) fn identifier_name(catalog: &dyn SyntaxCatalog, name: &str) -> Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    builder
        .start_node("IdentifierName")?
        .token("IdentifierToken", name)?
        .finish_node();
    Ok(builder.finish())
}

/// `ref int`, or `ref readonly int`
pub(crate) fn ref_type(catalog: &dyn SyntaxCatalog, read_only: bool) -> Result<SyntaxNode> {
    let mut builder = SyntaxBuilder::new(catalog);
    builder
        .start_node("RefType")?
        .fixed_token("RefKeyword")?
        .token("Whitespace", " ")?;
    if read_only {
        builder
            .fixed_token("ReadOnlyKeyword")?
            .token("Whitespace", " ")?;
    }
    builder
        .start_node("PredefinedType")?
        .fixed_token("IntKeyword")?
        .finish_node()
        .finish_node();
    Ok(builder.finish())
}
