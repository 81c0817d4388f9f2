//! Rowan language implementation for the host tree model
//!
//! Unlike a grammar with a fixed kind enum, the host model's kinds are raw
//! tags whose meaning is defined by the loaded syntax catalog. Two catalog
//! versions may assign the same name to different tags, so nothing here
//! knows what a tag stands for.

use std::fmt;

use rowan::Language;

/// Raw kind tag of a host tree node or token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RawKind(pub u16);

impl RawKind {
    /// Reserved tag for parentless helper nodes: detached tokens and
    /// separated lists that were built without a known list kind.
    ///
    /// Catalogs may not assign this tag to a real kind.
    pub const DETACHED: RawKind = RawKind(u16::MAX);

    pub const fn is_detached(self) -> bool {
        self.0 == Self::DETACHED.0
    }
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<RawKind> for rowan::SyntaxKind {
    fn from(kind: RawKind) -> Self {
        rowan::SyntaxKind(kind.0)
    }
}

impl From<rowan::SyntaxKind> for RawKind {
    fn from(kind: rowan::SyntaxKind) -> Self {
        RawKind(kind.0)
    }
}

/// Language implementation for the host tree model
///
/// This is a zero-sized type that implements `rowan::Language` so that rowan's
/// generic tree types can be parameterized over catalog-defined kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostLanguage;

impl Language for HostLanguage {
    type Kind = RawKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        RawKind(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind.0)
    }
}
