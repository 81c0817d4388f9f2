//! End-to-end tests for the tuple type facade on a current host

mod common;

use anyhow::Result;
use lightup_core::syntax::catalogs;
use lightup_core::{SeparatedList, TupleElementSyntax, TupleTypeSyntax};

#[test]
fn test_read_tuple_members() -> Result<()> {
    let registry = common::registry(catalogs::csharp_7_3()?);
    let node = common::tuple_type(
        registry.catalog(),
        &[("IntKeyword", "count"), ("StringKeyword", "name")],
    )?;
    assert_eq!(node.text().to_string(), "(int count, string name)");

    let tuple = TupleTypeSyntax::from_generic(&registry, Some(node))?;
    let elements = tuple.elements()?;
    assert_eq!(elements.len(), 2);

    let mut summary = Vec::new();
    for element in elements.iter() {
        let element = element?;
        let ty = element.type_node()?.map(|n| n.text().to_string());
        let name = element.identifier()?.map(|t| t.text().to_string());
        summary.push((ty, name));
    }
    assert_eq!(
        summary,
        vec![
            (Some("int".to_string()), Some("count".to_string())),
            (Some("string".to_string()), Some("name".to_string())),
        ]
    );
    Ok(())
}

#[test]
fn test_add_elements_snapshot() -> Result<()> {
    let registry = common::registry(catalogs::csharp_7_3()?);
    let catalog = registry.catalog();
    let node = common::tuple_type(catalog, &[("IntKeyword", "a"), ("StringKeyword", "b")])?;
    let tuple = TupleTypeSyntax::from_generic(&registry, Some(node))?;

    let c = common::tuple_element(catalog, "IntKeyword", "c")?;
    let c = TupleElementSyntax::from_generic(&registry, Some(c))?;
    let extended = tuple.add_elements([c])?;

    let elements = extended.elements()?;
    assert_eq!(elements.len(), 3);
    assert_eq!(elements.separator_count(), 2);

    let updated = extended.to_generic().expect("updated tuple node");
    insta::assert_snapshot!(common::dump(catalog, &updated), @r#"
    TupleType
      OpenParenToken "("
      TupleElementList
        TupleElement
          PredefinedType
            IntKeyword "int"
          Whitespace " "
          IdentifierToken "a"
        CommaToken ","
        Whitespace " "
        TupleElement
          PredefinedType
            StringKeyword "string"
          Whitespace " "
          IdentifierToken "b"
        CommaToken ","
        TupleElement
          PredefinedType
            IntKeyword "int"
          Whitespace " "
          IdentifierToken "c"
      CloseParenToken ")"
    "#);

    // The source tree is unchanged
    assert_eq!(
        tuple.node().map(|n| n.text().to_string()).as_deref(),
        Some("(int a, string b)")
    );
    Ok(())
}

#[test]
fn test_rewrite_every_element_name() -> Result<()> {
    let registry = common::registry(catalogs::csharp_7_3()?);
    let node = common::tuple_type(
        registry.catalog(),
        &[("IntKeyword", "a"), ("IntKeyword", "b"), ("IntKeyword", "c")],
    )?;
    let tuple = TupleTypeSyntax::from_generic(&registry, Some(node))?;

    let mut renamed = Vec::new();
    for element in tuple.elements()?.iter() {
        let element = element?;
        let upper = element
            .identifier()?
            .map(|t| t.text().to_uppercase())
            .unwrap_or_default();
        let name = registry.token_with_text("IdentifierToken", &upper)?;
        renamed.push(element.with_identifier(name)?);
    }

    // Elements built from scratch get the member's list kind and separators
    let elements = SeparatedList::empty(&registry).add_range(renamed);
    let rewritten = tuple.with_elements(elements)?;
    assert_eq!(
        rewritten.node().map(|n| n.text().to_string()).as_deref(),
        Some("(int A,int B,int C)")
    );
    Ok(())
}

#[test]
fn test_catalog_names_in_errors() -> Result<()> {
    let registry = common::registry(catalogs::csharp_7_3()?);
    let node = common::predefined_type(registry.catalog(), "StringKeyword")?;

    let error = TupleTypeSyntax::from_generic(&registry, Some(node)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Cannot cast 'CSharp.Syntax.PredefinedType' to 'CSharp.Syntax.TupleType'"
    );
    Ok(())
}
