//! Ref type facade: `ref int`, `ref readonly int`

use semver::Version;

use crate::facade::Wrapper;
use crate::result::Result;
use crate::schema::{OptionalKind, Property};
use crate::tree::{SyntaxNode, SyntaxToken};

/// `RefType` node kind
pub struct RefType;

impl OptionalKind for RefType {
    const NAME: &'static str = "RefType";
    const SINCE: Version = Version::new(7, 0, 0);
}

pub struct RefKeyword;

impl Property for RefKeyword {
    type Owner = RefType;
    type Value<'r> = Option<SyntaxToken>;
    const NAME: &'static str = "RefKeyword";
}

/// `readonly` modifier of `ref readonly` returns and locals
pub struct ReadOnlyKeyword;

impl Property for ReadOnlyKeyword {
    type Owner = RefType;
    type Value<'r> = Option<SyntaxToken>;
    const NAME: &'static str = "ReadOnlyKeyword";
    const SINCE: Version = Version::new(7, 2, 0);
}

pub struct Type;

impl Property for Type {
    type Owner = RefType;
    type Value<'r> = Option<SyntaxNode>;
    const NAME: &'static str = "Type";
}

pub type RefTypeSyntax<'r> = Wrapper<'r, RefType>;

impl Wrapper<'_, RefType> {
    pub fn ref_keyword(&self) -> Result<Option<SyntaxToken>> {
        self.get::<RefKeyword>()
    }

    /// Always `None` on hosts older than 7.2
    pub fn read_only_keyword(&self) -> Result<Option<SyntaxToken>> {
        self.get::<ReadOnlyKeyword>()
    }

    pub fn type_node(&self) -> Result<Option<SyntaxNode>> {
        self.get::<Type>()
    }

    pub fn with_ref_keyword(&self, token: Option<SyntaxToken>) -> Result<Self> {
        self.with::<RefKeyword>(token)
    }

    /// No-op on hosts older than 7.2
    pub fn with_read_only_keyword(&self, token: Option<SyntaxToken>) -> Result<Self> {
        self.with::<ReadOnlyKeyword>(token)
    }

    pub fn with_type_node(&self, node: Option<SyntaxNode>) -> Result<Self> {
        self.with::<Type>(node)
    }
}
