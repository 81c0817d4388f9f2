//! Syntax catalog of the loaded host library version
//!
//! The catalog is the only place that knows what a [`RawKind`] means in the
//! loaded version: its name, base kind, token/trivia classification and the
//! member layout of node kinds. The registry only ever reads it, and assumes
//! it never changes for the lifetime of the process.

mod loader;
mod manifest;

pub use loader::CatalogLoader;
pub use manifest::{CatalogManifest, KindManifest, MemberManifest, StaticCatalog};

use std::fmt;

use semver::Version;

use crate::tree::RawKind;

/// Description of one kind in the loaded catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindInfo {
    pub raw: RawKind,
    pub name: String,
    pub namespace: Option<String>,
    /// Kind this one is assignable to, if any
    pub base: Option<RawKind>,
    pub is_token: bool,
    pub is_trivia: bool,
    pub is_abstract: bool,
    /// Fixed text of punctuation and keyword tokens
    pub text: Option<String>,
}

impl KindInfo {
    /// Namespace-qualified name, e.g. `CSharp.Syntax.TupleType`
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Result of looking a kind up by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindLookup {
    Missing,
    Found(RawKind),
    Ambiguous(Vec<RawKind>),
}

/// Coarse value shape of a member, used to check declared against loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Token,
    Node,
    SeparatedList,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Token => write!(f, "token"),
            ValueShape::Node => write!(f, "node"),
            ValueShape::SeparatedList => write!(f, "separated list"),
        }
    }
}

/// Layout of a separated list member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListShape {
    pub list_kind: RawKind,
    pub element_kind: RawKind,
    pub separator_kind: RawKind,
    pub separator_text: String,
}

/// Resolved slot of a member inside its owner node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberShape {
    /// Token child of exactly `kind`
    Token { kind: RawKind },
    /// Node child whose kind is assignable to `kind`
    Node { kind: RawKind },
    /// List node child of exactly `list_kind`
    SeparatedList(ListShape),
}

impl MemberShape {
    pub fn value_shape(&self) -> ValueShape {
        match self {
            MemberShape::Token { .. } => ValueShape::Token,
            MemberShape::Node { .. } => ValueShape::Node,
            MemberShape::SeparatedList(_) => ValueShape::SeparatedList,
        }
    }
}

/// Description of one member of a node kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    pub shape: MemberShape,
}

/// Read-only view of the loaded host library's kinds and members
pub trait SyntaxCatalog: Send + Sync {
    /// Version the loaded library reports
    fn version(&self) -> &Version;

    /// Look a kind up by short or namespace-qualified name
    fn lookup_kind(&self, name: &str) -> KindLookup;

    /// Get the description of a raw kind
    fn kind(&self, raw: RawKind) -> Option<&KindInfo>;

    /// Members of a node kind in layout order
    fn members(&self, owner: RawKind) -> &[MemberInfo];

    /// Look a member up by owner kind and member name
    fn lookup_member(&self, owner: RawKind, name: &str) -> Option<&MemberInfo> {
        self.members(owner).iter().find(|member| member.name == name)
    }

    /// Check whether `actual` is `target` or derives from it
    fn is_assignable(&self, actual: RawKind, target: RawKind) -> bool {
        let mut current = Some(actual);
        // Base chains are validated acyclic; the bound only guards foreign catalogs.
        for _ in 0..=u16::MAX {
            match current {
                Some(kind) if kind == target => return true,
                Some(kind) => current = self.kind(kind).and_then(|info| info.base),
                None => return false,
            }
        }
        false
    }

    /// Check if a kind is whitespace or comment trivia
    fn is_trivia(&self, raw: RawKind) -> bool {
        self.kind(raw).is_some_and(|info| info.is_trivia)
    }

    /// Qualified kind name for messages; unknown tags print as `#n`
    fn kind_name(&self, raw: RawKind) -> String {
        self.kind(raw)
            .map(KindInfo::qualified_name)
            .unwrap_or_else(|| raw.to_string())
    }
}
