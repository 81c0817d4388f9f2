//! Declared capability schema
//!
//! Analysis code is written against a schema: a set of optional kinds and
//! members, each tagged with the host version that introduced it. The
//! registry checks these tags against the version the loaded catalog reports,
//! so a capability newer than the loaded host is reported absent without ever
//! consulting the catalog for it.
//!
//! Kinds and members are declared with zero-sized marker types:
//!
//! ```ignore
//! pub struct TupleType;
//!
//! impl OptionalKind for TupleType {
//!     const NAME: &'static str = "TupleType";
//!     const SINCE: Version = Version::new(7, 0, 0);
//! }
//!
//! pub struct OpenParenToken;
//!
//! impl Property for OpenParenToken {
//!     type Owner = TupleType;
//!     type Value<'r> = Option<SyntaxToken>;
//!     const NAME: &'static str = "OpenParenToken";
//! }
//!
//! let schema = Schema::new(Version::new(7, 3, 0)).declare::<OpenParenToken>();
//! ```

use indexmap::IndexMap;
use semver::Version;

use crate::catalog::ValueShape;
use crate::registry::SlotValue;

/// A node kind that may be missing from the loaded host version
pub trait OptionalKind: 'static {
    /// Kind name as the catalog knows it
    const NAME: &'static str;

    /// First host version that has this kind
    const SINCE: Version;
}

/// A typed member of an optional kind
pub trait Property: 'static {
    type Owner: OptionalKind;

    /// Value read from and written to the member
    type Value<'r>: SlotValue<'r>;

    /// Member name as the catalog knows it
    const NAME: &'static str;

    /// First host version that has this member
    const SINCE: Version = <Self::Owner as OptionalKind>::SINCE;
}

/// Declared member of a kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    pub name: String,
    pub since: Version,
    pub shape: ValueShape,
}

/// Declared kind with its members in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSpec {
    pub name: String,
    pub since: Version,
    pub members: IndexMap<String, MemberSpec>,
}

/// Capability schema an analysis was written against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    target: Version,
    kinds: IndexMap<String, KindSpec>,
}

impl Schema {
    /// Create an empty schema targeting the given host version
    pub fn new(target: Version) -> Self {
        Self {
            target,
            kinds: IndexMap::new(),
        }
    }

    /// Schema without declarations: nothing is version gated
    pub fn empty() -> Self {
        Self::new(Version::new(0, 0, 0))
    }

    /// Host version the declaring code was written against
    pub fn target(&self) -> &Version {
        &self.target
    }

    /// Declare an optional kind
    pub fn declare_kind<K: OptionalKind>(mut self) -> Self {
        self.kinds
            .entry(K::NAME.to_string())
            .or_insert_with(|| KindSpec {
                name: K::NAME.to_string(),
                since: K::SINCE,
                members: IndexMap::new(),
            });
        self
    }

    /// Declare a member, together with its owner kind
    pub fn declare<P: Property>(self) -> Self {
        let mut schema = self.declare_kind::<P::Owner>();
        if let Some(kind) = schema.kinds.get_mut(<P::Owner as OptionalKind>::NAME) {
            kind.members.insert(
                P::NAME.to_string(),
                MemberSpec {
                    name: P::NAME.to_string(),
                    since: P::SINCE,
                    shape: <P::Value<'static> as SlotValue<'static>>::SHAPE,
                },
            );
        }
        schema
    }

    /// Get a declared kind
    pub fn kind(&self, name: &str) -> Option<&KindSpec> {
        self.kinds.get(name)
    }

    /// Get a declared member
    pub fn member(&self, kind: &str, member: &str) -> Option<&MemberSpec> {
        self.kinds.get(kind).and_then(|spec| spec.members.get(member))
    }

    /// Get a declared kind by short or namespace-qualified name
    ///
    /// Schemas declare short names, so `CSharp.Syntax.RefType` finds `RefType`.
    pub fn find_kind(&self, name: &str) -> Option<&KindSpec> {
        self.kinds.get(name).or_else(|| {
            let (_, short) = name.rsplit_once('.')?;
            self.kinds.get(short)
        })
    }

    /// Get a declared member of a kind given by short or qualified name
    pub fn find_member(&self, kind: &str, member: &str) -> Option<&MemberSpec> {
        self.find_kind(kind).and_then(|spec| spec.members.get(member))
    }

    /// Declared kinds in declaration order
    pub fn kinds(&self) -> impl Iterator<Item = &KindSpec> {
        self.kinds.values()
    }
}
