//! Result type alias for lightup operations

use crate::error::LightupError;

/// Standard Result type for lightup operations
pub type Result<T> = std::result::Result<T, LightupError>;
