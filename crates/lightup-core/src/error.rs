//! Error types and handling for lightup resolution and facade operations

use thiserror::Error;

use crate::catalog::ValueShape;

/// Main error type for lightup operations
///
/// Absent kinds and members are never reported through this type: they
/// degrade to default values and no-op updates. Everything here is either a
/// caller logic error or a catalog that cannot be used at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightupError {
    /// Checked conversion of a node whose kind is not the facade's kind
    #[error("Cannot cast '{actual}' to '{expected}'")]
    KindMismatch { actual: String, expected: String },

    /// A kind name matched more than one kind in the loaded catalog
    #[error("Syntax kind '{name}' is ambiguous in catalog {version}: {}", candidates.join(", "))]
    AmbiguousKind {
        name: String,
        version: String,
        candidates: Vec<String>,
    },

    /// A member exists but its value shape differs from the declared one
    #[error("Member '{kind}.{member}' is a {actual} in the loaded catalog, expected a {expected}")]
    IncompatibleMember {
        kind: String,
        member: String,
        expected: ValueShape,
        actual: ValueShape,
    },

    /// A kind or member name that can never resolve
    #[error("Malformed name '{name}'")]
    MalformedName { name: String },

    /// Separated list position outside of the list
    #[error("Index {index} is out of range for a list of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// Catalog manifest loading or validation errors
    #[error("Catalog error: {message}")]
    Catalog { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Cast,
    Resolution,
    Usage,
    Catalog,
}

impl LightupError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LightupError::KindMismatch { .. } => ErrorKind::Cast,
            LightupError::AmbiguousKind { .. } => ErrorKind::Resolution,
            LightupError::IncompatibleMember { .. } => ErrorKind::Resolution,
            LightupError::MalformedName { .. } => ErrorKind::Usage,
            LightupError::IndexOutOfRange { .. } => ErrorKind::Usage,
            LightupError::Catalog { .. } => ErrorKind::Catalog,
        }
    }

    /// Check if processing other nodes can continue after this error
    ///
    /// Resolution and catalog errors come from a static catalog, so retrying
    /// against the same catalog can never succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Cast | ErrorKind::Usage)
    }

    /// Create a kind mismatch error
    pub fn kind_mismatch(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::KindMismatch {
            actual: actual.into(),
            expected: expected.into(),
        }
    }

    /// Create a malformed name error
    pub fn malformed_name(name: impl Into<String>) -> Self {
        Self::MalformedName { name: name.into() }
    }

    /// Create a catalog error
    pub fn catalog_error(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }
}
