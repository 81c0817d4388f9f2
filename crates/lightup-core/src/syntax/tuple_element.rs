//! Tuple element facade: `int a` inside a tuple type

use semver::Version;

use crate::facade::Wrapper;
use crate::result::Result;
use crate::schema::{OptionalKind, Property};
use crate::tree::{SyntaxNode, SyntaxToken};

/// `TupleElement` node kind
pub struct TupleElement;

impl OptionalKind for TupleElement {
    const NAME: &'static str = "TupleElement";
    const SINCE: Version = Version::new(7, 0, 0);
}

/// Element type, any node assignable to `Type`
pub struct Type;

impl Property for Type {
    type Owner = TupleElement;
    type Value<'r> = Option<SyntaxNode>;
    const NAME: &'static str = "Type";
}

/// Optional element name
pub struct Identifier;

impl Property for Identifier {
    type Owner = TupleElement;
    type Value<'r> = Option<SyntaxToken>;
    const NAME: &'static str = "Identifier";
}

pub type TupleElementSyntax<'r> = Wrapper<'r, TupleElement>;

impl Wrapper<'_, TupleElement> {
    pub fn type_node(&self) -> Result<Option<SyntaxNode>> {
        self.get::<Type>()
    }

    pub fn identifier(&self) -> Result<Option<SyntaxToken>> {
        self.get::<Identifier>()
    }

    pub fn with_type_node(&self, node: Option<SyntaxNode>) -> Result<Self> {
        self.with::<Type>(node)
    }

    pub fn with_identifier(&self, token: Option<SyntaxToken>) -> Result<Self> {
        self.with::<Identifier>(token)
    }
}
