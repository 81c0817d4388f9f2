//! Accessor factory and cache
//!
//! [`LightupRegistry`] is constructed once per loaded catalog and handed to
//! every consumer. It resolves kind names to [`KindDescriptor`]s and
//! (kind, member) pairs to [`RawAccessor`]s, each at most once; both caches
//! are append-only for the lifetime of the registry.
//!
//! Resolution never fails because a capability is missing. An absent kind or
//! member resolves to a descriptor that matches no node and to accessors that
//! read defaults and leave owners unchanged. Errors are reserved for misuse
//! (malformed names, owners of the wrong kind) and for catalogs that cannot
//! answer unambiguously.
//!
//! ```ignore
//! let registry = LightupRegistry::new(Arc::new(catalog), syntax::schema());
//! let tuple_type = registry.kind::<TupleType>()?;
//! if tuple_type.is_instance(&node) {
//!     let elements = registry.member::<tuple_type::Elements>()?.get(&node)?;
//! }
//! ```

mod accessor;

pub use accessor::{MemberAccessor, RawAccessor, SlotValue, Unsupported};

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use semver::Version;
use tracing::{debug, trace};

use crate::catalog::{KindLookup, SyntaxCatalog};
use crate::error::LightupError;
use crate::facade::{SeparatedList, SyntaxWrapper};
use crate::result::Result;
use crate::schema::{OptionalKind, Property, Schema};
use crate::tree::{RawKind, SyntaxNode, SyntaxToken, detached_token};

/// Why a kind is absent from the loaded host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absence {
    /// The catalog has no kind of that name
    NotInCatalog,
    /// The kind was introduced after the loaded host version
    RequiresVersion { since: Version, loaded: Version },
}

/// Resolution state of a kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindState {
    Present(RawKind),
    Absent(Absence),
}

/// A kind name resolved against the loaded catalog
pub struct KindDescriptor {
    name: String,
    state: KindState,
    catalog: Arc<dyn SyntaxCatalog>,
}

impl KindDescriptor {
    /// Name the kind was requested by
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &KindState {
        &self.state
    }

    pub fn raw(&self) -> Option<RawKind> {
        match self.state {
            KindState::Present(raw) => Some(raw),
            KindState::Absent(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.raw().is_some()
    }

    /// Qualified catalog name when present, requested name otherwise
    pub fn display_name(&self) -> String {
        match self.raw() {
            Some(raw) => self.catalog.kind_name(raw),
            None => self.name.clone(),
        }
    }

    /// Check whether `node` is an instance of this kind in the loaded host
    ///
    /// Always false for absent kinds.
    pub fn is_instance(&self, node: &SyntaxNode) -> bool {
        self.raw()
            .is_some_and(|raw| self.catalog.is_assignable(node.kind(), raw))
    }
}

impl fmt::Debug for KindDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindDescriptor")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Cache entry filled once, outside of any map lock
type CacheCell<T> = Arc<OnceCell<Result<Arc<T>>>>;

/// Thread-safe registry of resolved kinds and member accessors
pub struct LightupRegistry {
    catalog: Arc<dyn SyntaxCatalog>,
    schema: Schema,
    /// Kind name → descriptor, or the fatal error of its first resolution
    kinds: DashMap<String, CacheCell<KindDescriptor>>,
    /// (kind name, member name) → accessor
    members: DashMap<(String, String), CacheCell<RawAccessor>>,
}

impl LightupRegistry {
    /// Create a registry for a loaded catalog and a declared schema
    pub fn new(catalog: Arc<dyn SyntaxCatalog>, schema: Schema) -> Self {
        debug!(
            "Creating lightup registry: loaded host {}, schema target {}",
            catalog.version(),
            schema.target()
        );
        Self {
            catalog,
            schema,
            kinds: DashMap::new(),
            members: DashMap::new(),
        }
    }

    pub fn catalog(&self) -> &dyn SyntaxCatalog {
        self.catalog.as_ref()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Version of the loaded host
    pub fn version(&self) -> &Version {
        self.catalog.version()
    }

    /// Number of kind names resolved so far
    pub fn resolved_kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Number of (kind, member) pairs resolved so far
    pub fn resolved_member_count(&self) -> usize {
        self.members.len()
    }

    /// Resolve a kind name, once per name
    pub fn resolve_kind(&self, name: &str) -> Result<Arc<KindDescriptor>> {
        validate_name(name, true)?;

        let cell = match self.kinds.get(name) {
            Some(cached) => {
                trace!("Kind cache hit for '{}'", name);
                Arc::clone(cached.value())
            }
            None => Arc::clone(self.kinds.entry(name.to_string()).or_default().value()),
        };

        // The shard lock is released before the first caller builds the entry
        cell.get_or_init(|| self.build_kind(name)).clone()
    }

    /// Resolve a declared optional kind
    pub fn kind<K: OptionalKind>(&self) -> Result<Arc<KindDescriptor>> {
        self.resolve_kind(K::NAME)
    }

    /// Resolve the accessor of a member, once per (kind, member)
    ///
    /// Fails only for malformed names, fatal catalog conflicts, or when the
    /// member's shape does not fit `V`.
    pub fn resolve_member_accessor<'r, V: SlotValue<'r>>(
        &'r self,
        kind: &KindDescriptor,
        member: &str,
    ) -> Result<MemberAccessor<'r, V>> {
        validate_name(member, false)?;

        let key = (kind.name().to_string(), member.to_string());
        let cell = match self.members.get(&key) {
            Some(cached) => {
                trace!("Accessor cache hit for '{}.{}'", kind.name(), member);
                Arc::clone(cached.value())
            }
            None => Arc::clone(self.members.entry(key).or_default().value()),
        };
        let raw = cell
            .get_or_init(|| self.build_accessor(kind, member))
            .clone()?;

        if let Some(shape) = raw.shape() {
            let actual = shape.value_shape();
            if actual != V::SHAPE {
                return Err(LightupError::IncompatibleMember {
                    kind: kind.name().to_string(),
                    member: member.to_string(),
                    expected: V::SHAPE,
                    actual,
                });
            }
        }

        Ok(MemberAccessor::new(self, raw))
    }

    /// Resolve the accessor of a separated-list member
    pub fn resolve_list_accessor<'r, T: SyntaxWrapper<'r>>(
        &'r self,
        kind: &KindDescriptor,
        member: &str,
    ) -> Result<MemberAccessor<'r, SeparatedList<'r, T>>> {
        self.resolve_member_accessor(kind, member)
    }

    /// Resolve the accessor of a declared member
    pub fn member<'r, P: Property>(&'r self) -> Result<MemberAccessor<'r, P::Value<'r>>> {
        let kind = self.kind::<P::Owner>()?;
        self.resolve_member_accessor(&kind, P::NAME)
    }

    /// Create a parentless token of a fixed-text kind
    ///
    /// Returns `None` when the loaded host has no such token kind.
    pub fn token(&self, name: &str) -> Result<Option<SyntaxToken>> {
        let kind = self.resolve_kind(name)?;
        let token = kind.raw().and_then(|raw| {
            let text = self.catalog.kind(raw)?.text.clone()?;
            detached_token(raw, &text)
        });
        Ok(token)
    }

    /// Create a parentless token of a kind with explicit text
    pub fn token_with_text(&self, name: &str, text: &str) -> Result<Option<SyntaxToken>> {
        let kind = self.resolve_kind(name)?;
        Ok(kind.raw().and_then(|raw| detached_token(raw, text)))
    }

    fn build_kind(&self, name: &str) -> Result<Arc<KindDescriptor>> {
        let loaded = self.catalog.version();

        let state = match self.schema.find_kind(name) {
            Some(spec) if spec.since > *loaded => {
                debug!(
                    "Kind '{}' requires host {} but {} is loaded",
                    name, spec.since, loaded
                );
                KindState::Absent(Absence::RequiresVersion {
                    since: spec.since.clone(),
                    loaded: loaded.clone(),
                })
            }
            _ => match self.catalog.lookup_kind(name) {
                KindLookup::Found(raw) => {
                    debug!("Resolved kind '{}' to {} in host {}", name, raw, loaded);
                    KindState::Present(raw)
                }
                KindLookup::Missing => {
                    debug!("Kind '{}' is not present in host {}", name, loaded);
                    KindState::Absent(Absence::NotInCatalog)
                }
                KindLookup::Ambiguous(candidates) => {
                    return Err(LightupError::AmbiguousKind {
                        name: name.to_string(),
                        version: loaded.to_string(),
                        candidates: candidates
                            .into_iter()
                            .map(|raw| self.catalog.kind_name(raw))
                            .collect(),
                    });
                }
            },
        };

        Ok(Arc::new(KindDescriptor {
            name: name.to_string(),
            state,
            catalog: Arc::clone(&self.catalog),
        }))
    }

    fn build_accessor(&self, kind: &KindDescriptor, member: &str) -> Result<Arc<RawAccessor>> {
        let loaded = self.catalog.version();

        let Some(owner) = kind.raw() else {
            debug!("Accessor '{}.{}' is unsupported: kind absent", kind.name(), member);
            return Ok(Arc::new(RawAccessor::unsupported(
                kind.name(),
                member,
                Unsupported::KindAbsent,
            )));
        };

        let declared = self.schema.find_member(kind.name(), member);
        if let Some(spec) = declared {
            if spec.since > *loaded {
                debug!(
                    "Accessor '{}.{}' requires host {} but {} is loaded",
                    kind.name(),
                    member,
                    spec.since,
                    loaded
                );
                return Ok(Arc::new(RawAccessor::degraded(
                    Arc::clone(&self.catalog),
                    kind.name(),
                    owner,
                    member,
                    Unsupported::RequiresVersion {
                        since: spec.since.clone(),
                        loaded: loaded.clone(),
                    },
                )));
            }
        }

        let Some(info) = self.catalog.lookup_member(owner, member) else {
            debug!(
                "Accessor '{}.{}' is unsupported: member missing in host {}",
                kind.name(),
                member,
                loaded
            );
            return Ok(Arc::new(RawAccessor::degraded(
                Arc::clone(&self.catalog),
                kind.name(),
                owner,
                member,
                Unsupported::MissingMember,
            )));
        };

        if let Some(spec) = declared {
            let actual = info.shape.value_shape();
            if spec.shape != actual {
                return Err(LightupError::IncompatibleMember {
                    kind: kind.name().to_string(),
                    member: member.to_string(),
                    expected: spec.shape,
                    actual,
                });
            }
        }

        let members = self.catalog.members(owner);
        let layout = members.iter().map(|candidate| candidate.shape.clone()).collect();
        let ordinal = members
            .iter()
            .position(|candidate| candidate.name == info.name)
            .unwrap_or(members.len());

        debug!("Bound accessor '{}.{}' in host {}", kind.name(), member, loaded);
        Ok(Arc::new(RawAccessor::bound(
            Arc::clone(&self.catalog),
            kind.name(),
            owner,
            member,
            info.shape.clone(),
            layout,
            ordinal,
        )))
    }
}

impl fmt::Debug for LightupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightupRegistry")
            .field("version", self.catalog.version())
            .field("kinds", &self.kinds.len())
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

/// Check that a kind (dotted) or member (plain) name can ever resolve
fn validate_name(name: &str, dotted: bool) -> Result<()> {
    let is_identifier = |segment: &str| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    let valid = if dotted {
        name.split('.').all(is_identifier)
    } else {
        is_identifier(name)
    };

    if valid {
        Ok(())
    } else {
        Err(LightupError::malformed_name(name))
    }
}
