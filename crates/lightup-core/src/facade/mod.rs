//! Typed facades over optional kinds
//!
//! A [`Wrapper`] is a small value holding a registry reference and, unless
//! it is the default wrapper, a node that is an instance of its kind in the
//! loaded host. Properties are read and updated through the registry's cached
//! accessors, so callers never deal with catalogs or raw kinds.
//!
//! Conversions are named by how they fail:
//! - [`Wrapper::from_generic`] is the checked downcast and fails with
//!   [`LightupError::KindMismatch`] for nodes of another kind
//! - [`Wrapper::to_generic`] is the upcast and never fails
//!
//! Every update returns a new wrapper around a new node; the receiver and its
//! tree are never modified.

mod list;

pub use list::SeparatedList;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::LightupError;
use crate::registry::{LightupRegistry, SlotValue};
use crate::result::Result;
use crate::schema::{OptionalKind, Property};
use crate::tree::SyntaxNode;

/// Common contract of node facades
pub trait SyntaxWrapper<'r>: Sized {
    /// Underlying node, `None` for the default wrapper
    fn node(&self) -> Option<&SyntaxNode>;

    /// Checked conversion from a generic node
    fn from_node(registry: &'r LightupRegistry, node: Option<SyntaxNode>) -> Result<Self>;

    /// Check whether `node` can be wrapped
    fn is_instance(registry: &'r LightupRegistry, node: &SyntaxNode) -> Result<bool>;
}

/// Generic facade over an optional kind `K`
pub struct Wrapper<'r, K> {
    registry: &'r LightupRegistry,
    node: Option<SyntaxNode>,
    _kind: PhantomData<fn() -> K>,
}

impl<'r, K: OptionalKind> Wrapper<'r, K> {
    /// The default wrapper: no node, every property reads as empty
    pub fn empty(registry: &'r LightupRegistry) -> Self {
        Self {
            registry,
            node: None,
            _kind: PhantomData,
        }
    }

    /// Check whether `node` is an instance of `K` in the loaded host
    pub fn is_instance(registry: &'r LightupRegistry, node: &SyntaxNode) -> Result<bool> {
        Ok(registry.kind::<K>()?.is_instance(node))
    }

    /// Checked conversion from a generic node
    ///
    /// `None` converts to the default wrapper. A node that is not an instance
    /// of `K` fails with a kind mismatch naming both kinds.
    pub fn from_generic(registry: &'r LightupRegistry, node: Option<SyntaxNode>) -> Result<Self> {
        let Some(node) = node else {
            return Ok(Self::empty(registry));
        };

        let kind = registry.kind::<K>()?;
        if !kind.is_instance(&node) {
            return Err(LightupError::kind_mismatch(
                registry.catalog().kind_name(node.kind()),
                kind.display_name(),
            ));
        }

        Ok(Self {
            registry,
            node: Some(node),
            _kind: PhantomData,
        })
    }

    /// Conversion back to the generic node
    pub fn to_generic(self) -> Option<SyntaxNode> {
        self.node
    }

    pub fn node(&self) -> Option<&SyntaxNode> {
        self.node.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.node.is_none()
    }

    pub fn registry(&self) -> &'r LightupRegistry {
        self.registry
    }

    /// Read a property
    pub fn get<P: Property<Owner = K>>(&self) -> Result<P::Value<'r>> {
        match &self.node {
            Some(node) => self.registry.member::<P>()?.get(node),
            None => Ok(<P::Value<'r> as SlotValue<'r>>::empty(self.registry)),
        }
    }

    /// Copy with a property replaced
    ///
    /// Unsupported properties and default wrappers come back unchanged.
    pub fn with<P: Property<Owner = K>>(&self, value: P::Value<'r>) -> Result<Self> {
        let Some(node) = &self.node else {
            return Ok(self.clone());
        };

        let updated = self.registry.member::<P>()?.with_value(node, &value)?;
        Ok(Self {
            registry: self.registry,
            node: Some(updated),
            _kind: PhantomData,
        })
    }
}

impl<'r, K: OptionalKind> SyntaxWrapper<'r> for Wrapper<'r, K> {
    fn node(&self) -> Option<&SyntaxNode> {
        self.node.as_ref()
    }

    fn from_node(registry: &'r LightupRegistry, node: Option<SyntaxNode>) -> Result<Self> {
        Self::from_generic(registry, node)
    }

    fn is_instance(registry: &'r LightupRegistry, node: &SyntaxNode) -> Result<bool> {
        Wrapper::<K>::is_instance(registry, node)
    }
}

impl<K> Clone for Wrapper<'_, K> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            node: self.node.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> PartialEq for Wrapper<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<K> Eq for Wrapper<'_, K> {}

impl<K> Hash for Wrapper<'_, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<K: OptionalKind> fmt::Debug for Wrapper<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("kind", &K::NAME)
            .field("node", &self.node)
            .finish()
    }
}

impl<K> From<Wrapper<'_, K>> for Option<SyntaxNode> {
    fn from(wrapper: Wrapper<'_, K>) -> Self {
        wrapper.node
    }
}
