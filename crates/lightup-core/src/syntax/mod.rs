//! Facades for C# syntax kinds that older hosts lack
//!
//! Each kind has a marker type implementing [`OptionalKind`], one marker per
//! member implementing [`Property`], and a `*Syntax` alias of [`Wrapper`]
//! with named getters and `with_*` methods.
//!
//! | Kind             | Since | Members                                          |
//! |------------------|-------|--------------------------------------------------|
//! | `TupleType`      | 7.0   | `OpenParenToken`, `Elements`, `CloseParenToken`  |
//! | `TupleElement`   | 7.0   | `Type`, `Identifier`                             |
//! | `RefType`        | 7.0   | `RefKeyword`, `ReadOnlyKeyword` (7.2), `Type`    |
//!
//! [`Wrapper`]: crate::facade::Wrapper

pub mod catalogs;
pub mod ref_type;
pub mod tuple_element;
pub mod tuple_type;

#[cfg(test)]
pub(crate) mod fixtures;

pub use ref_type::{RefType, RefTypeSyntax};
pub use tuple_element::{TupleElement, TupleElementSyntax};
pub use tuple_type::{TupleType, TupleTypeSyntax};

use semver::Version;

use crate::schema::Schema;

/// Host version the bundled facades are written against
pub const TARGET_VERSION: Version = Version::new(7, 3, 0);

/// Schema declaring every bundled kind and member
pub fn schema() -> Schema {
    Schema::new(TARGET_VERSION)
        .declare::<tuple_type::OpenParenToken>()
        .declare::<tuple_type::Elements>()
        .declare::<tuple_type::CloseParenToken>()
        .declare::<tuple_element::Type>()
        .declare::<tuple_element::Identifier>()
        .declare::<ref_type::RefKeyword>()
        .declare::<ref_type::ReadOnlyKeyword>()
        .declare::<ref_type::Type>()
}
