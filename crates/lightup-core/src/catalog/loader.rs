//! Catalog manifest discovery and loading

use std::path::Path;

use super::{CatalogManifest, StaticCatalog};
use crate::error::LightupError;
use crate::result::Result;

/// Loader for catalog manifest files
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a manifest from a specific file
    ///
    /// Supports TOML (.toml) and JSON (.json) formats
    pub fn load_manifest(path: &Path) -> Result<CatalogManifest> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LightupError::catalog_error(format!(
                "Failed to read catalog manifest '{}': {e}",
                path.display()
            ))
        })?;

        let manifest = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => CatalogManifest::from_toml_str(&text),
            Some("json") => CatalogManifest::from_json_str(&text),
            _ => {
                return Err(LightupError::catalog_error(format!(
                    "Unsupported catalog manifest format: '{}' (expected .toml or .json)",
                    path.display()
                )));
            }
        };

        manifest.map_err(|e| {
            LightupError::catalog_error(format!(
                "Failed to load catalog manifest from '{}': {e}",
                path.display()
            ))
        })
    }

    /// Load and validate a catalog from a manifest file
    pub fn load(path: &Path) -> Result<StaticCatalog> {
        tracing::debug!("Loading syntax catalog from {}", path.display());
        StaticCatalog::from_manifest(Self::load_manifest(path)?)
    }
}
