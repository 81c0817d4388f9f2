//! Lightup Core
//!
//! Version-compatibility facades over a versioned syntax tree.
//! Analysis code written against a newer host library keeps working when an
//! older one is loaded: optional node kinds are resolved by name at first
//! use, cached, and exposed through typed wrappers that degrade to defaults
//! when the loaded host lacks them.

pub mod catalog;
pub mod error;
pub mod facade;
pub mod registry;
pub mod result;
pub mod schema;
pub mod syntax;
pub mod tree; // Host syntax tree (lossless, Rowan-based)

// Re-export commonly used types
pub use catalog::{
    CatalogLoader, CatalogManifest, KindInfo, KindLookup, KindManifest, ListShape, MemberInfo,
    MemberManifest, MemberShape, StaticCatalog, SyntaxCatalog, ValueShape,
};
pub use error::{ErrorKind, LightupError};
pub use facade::{SeparatedList, SyntaxWrapper, Wrapper};
pub use registry::{
    Absence, KindDescriptor, KindState, LightupRegistry, MemberAccessor, RawAccessor, SlotValue,
    Unsupported,
};
pub use result::Result;
pub use schema::{KindSpec, MemberSpec, OptionalKind, Property, Schema};
pub use syntax::{RefTypeSyntax, TupleElementSyntax, TupleTypeSyntax};
pub use tree::{
    HostLanguage, RawKind, SyntaxBuilder, SyntaxElement, SyntaxNode, SyntaxToken, detached_token,
};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lightup=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
