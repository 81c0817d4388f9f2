//! One registry shared by parallel analysis workers

mod common;

use std::sync::Arc;

use anyhow::Result;
use lightup_core::syntax::{catalogs, tuple_element, tuple_type};
use lightup_core::tree::{GreenNode, node_green};
use lightup_core::{RawAccessor, SyntaxNode, TupleElementSyntax, TupleTypeSyntax};
use rayon::prelude::*;

const WORKERS: usize = 64;

#[test]
fn test_parallel_workers_share_one_accessor() -> Result<()> {
    let registry = common::registry(catalogs::csharp_7_3()?);
    let tree = common::tuple_type(
        registry.catalog(),
        &[("IntKeyword", "a"), ("StringKeyword", "b")],
    )?;
    let green: GreenNode = node_green(&tree);

    let accessors: Vec<Arc<RawAccessor>> = (0..WORKERS)
        .into_par_iter()
        .map(|_| {
            registry
                .member::<tuple_type::Elements>()
                .map(|accessor| Arc::clone(accessor.raw()))
        })
        .collect::<lightup_core::Result<_>>()?;

    assert!(accessors.iter().all(|a| Arc::ptr_eq(a, &accessors[0])));
    assert_eq!(registry.resolved_member_count(), 1);
    assert_eq!(registry.resolved_kind_count(), 1);

    // Every worker builds its own view of the shared green tree
    let lengths: Vec<usize> = (0..WORKERS)
        .into_par_iter()
        .map(|_| {
            let root = SyntaxNode::new_root(green.clone());
            TupleTypeSyntax::from_generic(&registry, Some(root))?
                .elements()
                .map(|elements| elements.len())
        })
        .collect::<lightup_core::Result<_>>()?;
    assert!(lengths.iter().all(|&len| len == 2));
    Ok(())
}

#[test]
fn test_parallel_edits_do_not_interfere() -> Result<()> {
    let registry = common::registry(catalogs::csharp_7_3()?);
    let catalog = registry.catalog();
    let green = node_green(&common::tuple_type(catalog, &[("IntKeyword", "a")])?);
    let extra = node_green(&common::tuple_element(catalog, "IntKeyword", "x")?);

    let texts: Vec<String> = (0..WORKERS)
        .into_par_iter()
        .map(|index| -> lightup_core::Result<String> {
            let tuple =
                TupleTypeSyntax::from_generic(&registry, Some(SyntaxNode::new_root(green.clone())))?;
            let element = TupleElementSyntax::from_generic(
                &registry,
                Some(SyntaxNode::new_root(extra.clone())),
            )?;
            let name = registry.token_with_text("IdentifierToken", &format!("x{index}"))?;
            let element = element.with_identifier(name)?;

            let updated = tuple.add_elements([element])?;
            Ok(updated
                .node()
                .map(|node| node.text().to_string())
                .unwrap_or_default())
        })
        .collect::<lightup_core::Result<_>>()?;

    for (index, text) in texts.iter().enumerate() {
        assert_eq!(text, &format!("(int a,int x{index})"));
    }

    // The shared tree is unchanged
    assert_eq!(SyntaxNode::new_root(green).text().to_string(), "(int a)");

    // Only the members used above were resolved
    assert_eq!(registry.resolved_member_count(), 2);
    assert!(
        registry
            .member::<tuple_element::Identifier>()?
            .is_supported()
    );
    Ok(())
}
