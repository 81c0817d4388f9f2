//! Declarative catalog manifests
//!
//! A manifest describes one version of the host library: which kinds exist,
//! the raw tags they use and the layout of their members. Manifests can be
//! written in TOML or JSON:
//!
//! ```toml
//! version = "7.0.0"
//! namespace = "CSharp.Syntax"
//!
//! [[kinds]]
//! name = "CommaToken"
//! id = 3
//! token = true
//! text = ","
//!
//! [[kinds]]
//! name = "TupleType"
//! id = 230
//! base = "Type"
//!
//! [[kinds.members]]
//! shape = "separated_list"
//! name = "Elements"
//! list = "TupleElementList"
//! element = "TupleElement"
//! separator = "CommaToken"
//! ```

use std::collections::{HashMap, HashSet};

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{KindInfo, KindLookup, ListShape, MemberInfo, MemberShape, SyntaxCatalog};
use crate::error::LightupError;
use crate::result::Result;
use crate::tree::RawKind;

/// Top-level catalog manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    /// Version the described library reports
    pub version: Version,

    /// Default namespace for kinds that do not set their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub kinds: Vec<KindManifest>,
}

/// One kind entry of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindManifest {
    pub name: String,
    pub id: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the kind this one is assignable to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default)]
    pub token: bool,

    /// Trivia kinds are always tokens
    #[serde(default)]
    pub trivia: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberManifest>,
}

/// One member entry of a node kind, in layout order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MemberManifest {
    Token {
        name: String,
        kind: String,
    },
    Node {
        name: String,
        kind: String,
    },
    SeparatedList {
        name: String,
        list: String,
        element: String,
        separator: String,
    },
}

impl MemberManifest {
    pub fn name(&self) -> &str {
        match self {
            MemberManifest::Token { name, .. }
            | MemberManifest::Node { name, .. }
            | MemberManifest::SeparatedList { name, .. } => name,
        }
    }
}

impl CatalogManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| LightupError::catalog_error(format!("Invalid TOML manifest: {e}")))
    }

    /// Parse a manifest from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| LightupError::catalog_error(format!("Invalid JSON manifest: {e}")))
    }

    /// Render the manifest as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LightupError::catalog_error(format!("Cannot serialize manifest: {e}")))
    }
}

/// In-memory catalog built from a validated manifest
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    version: Version,
    kinds: HashMap<RawKind, KindInfo>,
    /// Short and qualified names to the kinds carrying them
    names: HashMap<String, Vec<RawKind>>,
    members: HashMap<RawKind, Vec<MemberInfo>>,
}

impl StaticCatalog {
    /// Parse and validate a TOML manifest
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::from_manifest(CatalogManifest::from_toml_str(text)?)
    }

    /// Parse and validate a JSON manifest
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_manifest(CatalogManifest::from_json_str(text)?)
    }

    /// Validate a manifest and index it
    pub fn from_manifest(manifest: CatalogManifest) -> Result<Self> {
        let mut catalog = Self {
            version: manifest.version.clone(),
            kinds: HashMap::new(),
            names: HashMap::new(),
            members: HashMap::new(),
        };

        let mut qualified_names = HashSet::new();
        for entry in &manifest.kinds {
            let raw = RawKind(entry.id);
            if raw.is_detached() {
                return Err(LightupError::catalog_error(format!(
                    "Kind '{}' uses reserved id {}",
                    entry.name, entry.id
                )));
            }
            if catalog.kinds.contains_key(&raw) {
                return Err(LightupError::catalog_error(format!(
                    "Duplicate kind id {} for '{}'",
                    entry.id, entry.name
                )));
            }

            let info = KindInfo {
                raw,
                name: entry.name.clone(),
                namespace: entry.namespace.clone().or_else(|| manifest.namespace.clone()),
                base: None,
                is_token: entry.token || entry.trivia,
                is_trivia: entry.trivia,
                is_abstract: entry.is_abstract,
                text: entry.text.clone(),
            };

            let qualified = info.qualified_name();
            if !qualified_names.insert(qualified.clone()) {
                return Err(LightupError::catalog_error(format!(
                    "Duplicate kind name '{qualified}'"
                )));
            }

            catalog.names.entry(info.name.clone()).or_default().push(raw);
            if qualified != info.name {
                catalog.names.entry(qualified).or_default().push(raw);
            }
            catalog.kinds.insert(raw, info);
        }

        // Bases and members may reference kinds declared later in the manifest.
        for entry in &manifest.kinds {
            let raw = RawKind(entry.id);
            if let Some(base) = &entry.base {
                let base = catalog.reference(base, &entry.name)?;
                if let Some(info) = catalog.kinds.get_mut(&raw) {
                    info.base = Some(base);
                }
            }

            let mut seen = HashSet::new();
            let mut members = Vec::with_capacity(entry.members.len());
            for member in &entry.members {
                if !seen.insert(member.name()) {
                    return Err(LightupError::catalog_error(format!(
                        "Duplicate member '{}.{}'",
                        entry.name,
                        member.name()
                    )));
                }
                members.push(catalog.member_info(&entry.name, member)?);
            }
            if !members.is_empty() {
                catalog.members.insert(raw, members);
            }
        }

        catalog.check_base_chains()?;

        debug!(
            "Loaded syntax catalog {} with {} kinds",
            catalog.version,
            catalog.kinds.len()
        );
        Ok(catalog)
    }

    /// Number of kinds in the catalog
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Resolve a kind reference inside the manifest itself
    fn reference(&self, name: &str, referrer: &str) -> Result<RawKind> {
        match self.lookup_kind(name) {
            KindLookup::Found(raw) => Ok(raw),
            KindLookup::Missing => Err(LightupError::catalog_error(format!(
                "Kind '{referrer}' references unknown kind '{name}'"
            ))),
            KindLookup::Ambiguous(_) => Err(LightupError::catalog_error(format!(
                "Kind '{referrer}' references ambiguous kind '{name}'"
            ))),
        }
    }

    fn token_reference(&self, name: &str, referrer: &str) -> Result<RawKind> {
        let raw = self.reference(name, referrer)?;
        if self.kinds.get(&raw).is_some_and(|info| info.is_token) {
            Ok(raw)
        } else {
            Err(LightupError::catalog_error(format!(
                "Member '{referrer}' expects '{name}' to be a token kind"
            )))
        }
    }

    fn node_reference(&self, name: &str, referrer: &str) -> Result<RawKind> {
        let raw = self.reference(name, referrer)?;
        if self.kinds.get(&raw).is_some_and(|info| !info.is_token) {
            Ok(raw)
        } else {
            Err(LightupError::catalog_error(format!(
                "Member '{referrer}' expects '{name}' to be a node kind"
            )))
        }
    }

    fn member_info(&self, owner: &str, member: &MemberManifest) -> Result<MemberInfo> {
        let referrer = format!("{owner}.{}", member.name());
        let shape = match member {
            MemberManifest::Token { kind, .. } => MemberShape::Token {
                kind: self.token_reference(kind, &referrer)?,
            },
            MemberManifest::Node { kind, .. } => MemberShape::Node {
                kind: self.node_reference(kind, &referrer)?,
            },
            MemberManifest::SeparatedList {
                list,
                element,
                separator,
                ..
            } => {
                let separator_kind = self.token_reference(separator, &referrer)?;
                let separator_text = self
                    .kinds
                    .get(&separator_kind)
                    .and_then(|info| info.text.clone())
                    .ok_or_else(|| {
                        LightupError::catalog_error(format!(
                            "Separator '{separator}' of '{referrer}' has no fixed text"
                        ))
                    })?;
                MemberShape::SeparatedList(ListShape {
                    list_kind: self.node_reference(list, &referrer)?,
                    element_kind: self.node_reference(element, &referrer)?,
                    separator_kind,
                    separator_text,
                })
            }
        };

        Ok(MemberInfo {
            name: member.name().to_string(),
            shape,
        })
    }

    fn check_base_chains(&self) -> Result<()> {
        for info in self.kinds.values() {
            let mut current = info.base;
            let mut steps = 0;
            while let Some(kind) = current {
                steps += 1;
                if kind == info.raw || steps > self.kinds.len() {
                    return Err(LightupError::catalog_error(format!(
                        "Base chain of '{}' is cyclic",
                        info.qualified_name()
                    )));
                }
                current = self.kinds.get(&kind).and_then(|base| base.base);
            }
        }
        Ok(())
    }
}

impl SyntaxCatalog for StaticCatalog {
    fn version(&self) -> &Version {
        &self.version
    }

    fn lookup_kind(&self, name: &str) -> KindLookup {
        match self.names.get(name).map(Vec::as_slice) {
            None | Some([]) => KindLookup::Missing,
            Some([raw]) => KindLookup::Found(*raw),
            Some(candidates) => {
                let mut candidates = candidates.to_vec();
                candidates.sort();
                KindLookup::Ambiguous(candidates)
            }
        }
    }

    fn kind(&self, raw: RawKind) -> Option<&KindInfo> {
        self.kinds.get(&raw)
    }

    fn members(&self, owner: RawKind) -> &[MemberInfo] {
        self.members.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }
}
