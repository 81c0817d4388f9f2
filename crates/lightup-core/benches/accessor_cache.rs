//! Benchmark of cached accessor lookups against first resolution
//!
//! Reads through a facade should cost a cache hit plus a child scan; the
//! catalog is only consulted when a registry resolves a member for the
//! first time.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lightup_core::syntax::{self, catalogs, tuple_type};
use lightup_core::{LightupRegistry, SyntaxBuilder, SyntaxNode, TupleTypeSyntax};
use std::hint::black_box;
use std::sync::Arc;

fn registry() -> LightupRegistry {
    let catalog = catalogs::csharp_7_3().unwrap();
    LightupRegistry::new(Arc::new(catalog), syntax::schema())
}

fn tuple_node(registry: &LightupRegistry, width: usize) -> SyntaxNode {
    let mut builder = SyntaxBuilder::new(registry.catalog());
    builder
        .start_node("TupleType")
        .unwrap()
        .fixed_token("OpenParenToken")
        .unwrap()
        .start_node("TupleElementList")
        .unwrap();
    for index in 0..width {
        if index > 0 {
            builder.fixed_token("CommaToken").unwrap();
        }
        builder
            .start_node("TupleElement")
            .unwrap()
            .start_node("PredefinedType")
            .unwrap()
            .fixed_token("IntKeyword")
            .unwrap()
            .finish_node()
            .token("Whitespace", " ")
            .unwrap()
            .token("IdentifierToken", &format!("item{index}"))
            .unwrap()
            .finish_node();
    }
    builder
        .finish_node()
        .fixed_token("CloseParenToken")
        .unwrap()
        .finish_node();
    builder.finish()
}

/// Benchmark member reads through a warm registry
fn bench_cached_member_read(c: &mut Criterion) {
    let registry = registry();
    let node = tuple_node(&registry, 8);
    let tuple = TupleTypeSyntax::from_generic(&registry, Some(node)).unwrap();
    let _ = tuple.elements().unwrap();

    c.bench_function("cached_member_read", |b| {
        b.iter(|| {
            let elements = black_box(&tuple).elements().unwrap();
            black_box(elements.len());
        });
    });
}

/// Benchmark first resolution on a fresh registry
fn bench_first_resolution(c: &mut Criterion) {
    c.bench_function("first_resolution", |b| {
        b.iter_batched(
            registry,
            |registry| {
                let accessor = registry.member::<tuple_type::Elements>().unwrap();
                black_box(accessor.is_supported());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark appending to a wide tuple
fn bench_add_elements(c: &mut Criterion) {
    let registry = registry();
    let node = tuple_node(&registry, 32);
    let tuple = TupleTypeSyntax::from_generic(&registry, Some(node)).unwrap();
    let extra = tuple.elements().unwrap().first().unwrap();

    c.bench_function("add_elements_32", |b| {
        b.iter(|| {
            let updated = black_box(&tuple).add_elements(extra.clone()).unwrap();
            black_box(updated);
        });
    });
}

criterion_group!(
    benches,
    bench_cached_member_read,
    bench_first_resolution,
    bench_add_elements
);

criterion_main!(benches);
