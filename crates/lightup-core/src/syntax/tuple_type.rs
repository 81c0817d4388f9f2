//! Tuple type facade: `(int a, string b)`

use semver::Version;

use super::TupleElementSyntax;
use crate::facade::{SeparatedList, Wrapper};
use crate::result::Result;
use crate::schema::{OptionalKind, Property};
use crate::tree::SyntaxToken;

/// `TupleType` node kind
pub struct TupleType;

impl OptionalKind for TupleType {
    const NAME: &'static str = "TupleType";
    const SINCE: Version = Version::new(7, 0, 0);
}

pub struct OpenParenToken;

impl Property for OpenParenToken {
    type Owner = TupleType;
    type Value<'r> = Option<SyntaxToken>;
    const NAME: &'static str = "OpenParenToken";
}

/// Comma-separated tuple elements
pub struct Elements;

impl Property for Elements {
    type Owner = TupleType;
    type Value<'r> = SeparatedList<'r, TupleElementSyntax<'r>>;
    const NAME: &'static str = "Elements";
}

pub struct CloseParenToken;

impl Property for CloseParenToken {
    type Owner = TupleType;
    type Value<'r> = Option<SyntaxToken>;
    const NAME: &'static str = "CloseParenToken";
}

/// Facade over a tuple type node
pub type TupleTypeSyntax<'r> = Wrapper<'r, TupleType>;

impl<'r> Wrapper<'r, TupleType> {
    pub fn open_paren_token(&self) -> Result<Option<SyntaxToken>> {
        self.get::<OpenParenToken>()
    }

    pub fn elements(&self) -> Result<SeparatedList<'r, TupleElementSyntax<'r>>> {
        self.get::<Elements>()
    }

    pub fn close_paren_token(&self) -> Result<Option<SyntaxToken>> {
        self.get::<CloseParenToken>()
    }

    pub fn with_open_paren_token(&self, token: Option<SyntaxToken>) -> Result<Self> {
        self.with::<OpenParenToken>(token)
    }

    pub fn with_elements(
        &self,
        elements: SeparatedList<'r, TupleElementSyntax<'r>>,
    ) -> Result<Self> {
        self.with::<Elements>(elements)
    }

    pub fn with_close_paren_token(&self, token: Option<SyntaxToken>) -> Result<Self> {
        self.with::<CloseParenToken>(token)
    }

    /// Copy with `items` appended to the elements
    pub fn add_elements(
        &self,
        items: impl IntoIterator<Item = TupleElementSyntax<'r>>,
    ) -> Result<Self> {
        self.with_elements(self.elements()?.add_range(items))
    }
}
