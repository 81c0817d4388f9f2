//! Host syntax tree model
//!
//! The host model is a lossless Rowan tree using the green/red pattern:
//!
//! - **Green Tree**: immutable, position-independent storage, cheap to clone
//!   and safe to share between threads
//! - **Red Tree**: views with parent pointers and identity, created on demand
//!   per thread for traversal
//!
//! Kinds are raw tags ([`RawKind`]) interpreted by the loaded
//! [`SyntaxCatalog`](crate::catalog::SyntaxCatalog). Every edit is
//! copy-on-write: updated nodes are new detached roots built from the green
//! storage of the original.

mod builder;
mod language;
mod nodes;

pub use builder::SyntaxBuilder;
pub use language::{HostLanguage, RawKind};
pub use nodes::{
    GreenElement, SyntaxElement, SyntaxNode, SyntaxToken, detached_token, element_green,
    green_children, new_root, node_green, rebuild, token_green,
};

// Re-export common rowan types for convenience
pub use rowan::{GreenNode, GreenToken, NodeOrToken};
