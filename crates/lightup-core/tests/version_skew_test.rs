//! The same analysis code run against every bundled host version

mod common;

use anyhow::Result;
use lightup_core::syntax::{catalogs, ref_type, tuple_type};
use lightup_core::{
    CatalogLoader, CatalogManifest, LightupRegistry, RefTypeSyntax, SyntaxBuilder, SyntaxCatalog,
    SyntaxNode, SyntaxToken, TupleTypeSyntax, Unsupported,
};
use semver::Version;
use tempfile::TempDir;

/// Number of tuple elements anywhere below `root`
fn count_tuple_elements(
    registry: &LightupRegistry,
    root: &SyntaxNode,
) -> lightup_core::Result<usize> {
    let mut count = 0;
    for node in root.descendants() {
        if TupleTypeSyntax::is_instance(registry, &node)? {
            count += TupleTypeSyntax::from_generic(registry, Some(node))?
                .elements()?
                .len();
        }
    }
    Ok(count)
}

/// A tree every host can represent, with a tuple where the host has them
fn sample_tree(registry: &LightupRegistry) -> Result<SyntaxNode> {
    let catalog = registry.catalog();
    if registry.kind::<tuple_type::TupleType>()?.is_present() {
        common::tuple_type(catalog, &[("IntKeyword", "a"), ("StringKeyword", "b")])
    } else {
        common::predefined_type(catalog, "IntKeyword")
    }
}

#[test]
fn test_analysis_runs_on_every_host() -> Result<()> {
    let mut counts = Vec::new();
    for registry in common::all_registries()? {
        let tree = sample_tree(&registry)?;
        counts.push((
            registry.version().to_string(),
            count_tuple_elements(&registry, &tree)?,
        ));
    }

    assert_eq!(
        counts,
        vec![
            ("6.0.0".to_string(), 0),
            ("7.0.0".to_string(), 2),
            ("7.3.0".to_string(), 2),
        ]
    );
    Ok(())
}

#[test]
fn test_unknown_kind_is_unsupported_everywhere() -> Result<()> {
    for registry in common::all_registries()? {
        let tree = sample_tree(&registry)?;
        let kind = registry.resolve_kind("FunctionPointerType")?;
        assert!(!kind.is_present());
        assert!(tree.descendants().all(|node| !kind.is_instance(&node)));

        let accessor =
            registry.resolve_member_accessor::<Option<SyntaxToken>>(&kind, "AsteriskToken")?;
        assert_eq!(
            accessor.raw().unsupported_reason(),
            Some(&Unsupported::KindAbsent)
        );
        for node in tree.descendants() {
            assert_eq!(accessor.get(&node)?, None);
            assert_eq!(accessor.with_value(&node, &None)?, node);
        }
    }
    Ok(())
}

#[test]
fn test_read_only_ref_depends_on_host() -> Result<()> {
    let mut seen = Vec::new();
    for registry in common::all_registries()? {
        if !registry.kind::<ref_type::RefType>()?.is_present() {
            seen.push((registry.version().clone(), None));
            continue;
        }

        let mut builder = SyntaxBuilder::new(registry.catalog());
        builder
            .start_node("RefType")?
            .fixed_token("RefKeyword")?
            .token("Whitespace", " ")?
            .start_node("PredefinedType")?
            .fixed_token("IntKeyword")?
            .finish_node()
            .finish_node();
        let wrapper = RefTypeSyntax::from_generic(&registry, Some(builder.finish()))?;

        let updated = wrapper.with_read_only_keyword(registry.token("ReadOnlyKeyword")?)?;
        let has_read_only = updated.read_only_keyword()?.is_some();
        seen.push((registry.version().clone(), Some(has_read_only)));
    }

    assert_eq!(
        seen,
        vec![
            (Version::new(6, 0, 0), None),
            (Version::new(7, 0, 0), Some(false)),
            (Version::new(7, 3, 0), Some(true)),
        ]
    );
    Ok(())
}

#[test]
fn test_catalog_loaded_from_json_file() -> Result<()> {
    let manifest = CatalogManifest::from_toml_str(include_str!("../catalogs/csharp-7.0.toml"))?;
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("csharp-7.0.json");
    std::fs::write(&path, manifest.to_json_string()?)?;

    let registry = common::registry(CatalogLoader::load(&path)?);
    assert_eq!(registry.version(), &Version::new(7, 0, 0));

    let tree = common::tuple_type(registry.catalog(), &[("IntKeyword", "x")])?;
    assert_eq!(count_tuple_elements(&registry, &tree)?, 1);

    let tuple = TupleTypeSyntax::from_generic(&registry, Some(tree))?;
    assert!(registry.member::<tuple_type::Elements>()?.is_supported());
    assert_eq!(tuple.elements()?.len(), 1);

    // Same tags as the bundled TOML catalog
    let bundled = catalogs::csharp_7_0()?;
    let node = tuple.to_generic().expect("tuple node");
    assert_eq!(bundled.kind_name(node.kind()), "CSharp.Syntax.TupleType");
    Ok(())
}
