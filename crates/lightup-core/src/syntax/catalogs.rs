//! Bundled catalogs of C# host versions
//!
//! Node tags differ between versions, which is exactly what facades have to
//! cope with. Token tags are stable.

use crate::catalog::StaticCatalog;
use crate::result::Result;

const CSHARP_6_0: &str = include_str!("../../catalogs/csharp-6.0.toml");
const CSHARP_7_0: &str = include_str!("../../catalogs/csharp-7.0.toml");
const CSHARP_7_3: &str = include_str!("../../catalogs/csharp-7.3.toml");

/// Host without tuple or ref types
pub fn csharp_6_0() -> Result<StaticCatalog> {
    StaticCatalog::from_toml_str(CSHARP_6_0)
}

/// Host with tuple and ref types, but no `ref readonly`
pub fn csharp_7_0() -> Result<StaticCatalog> {
    StaticCatalog::from_toml_str(CSHARP_7_0)
}

pub fn csharp_7_3() -> Result<StaticCatalog> {
    StaticCatalog::from_toml_str(CSHARP_7_3)
}

/// Every bundled catalog, oldest first
pub fn all() -> Result<Vec<StaticCatalog>> {
    Ok(vec![csharp_6_0()?, csharp_7_0()?, csharp_7_3()?])
}
