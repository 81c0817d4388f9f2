//! Name-based tree construction against a loaded catalog
//!
//! Raw tags differ between host versions, so replacement nodes for edits are
//! built by kind name and resolved against whatever catalog is loaded.

use rowan::{GreenNode, GreenNodeBuilder};

use super::{RawKind, SyntaxNode};
use crate::catalog::{KindLookup, SyntaxCatalog};
use crate::error::LightupError;
use crate::result::Result;

/// Builder for host trees using catalog kind names
pub struct SyntaxBuilder<'c> {
    catalog: &'c dyn SyntaxCatalog,
    inner: GreenNodeBuilder<'static>,
}

impl<'c> SyntaxBuilder<'c> {
    pub fn new(catalog: &'c dyn SyntaxCatalog) -> Self {
        Self {
            catalog,
            inner: GreenNodeBuilder::new(),
        }
    }

    /// Start a node of the named kind
    ///
    /// Abstract kinds only exist as bases and cannot be instantiated.
    pub fn start_node(&mut self, name: &str) -> Result<&mut Self> {
        let kind = self.resolve(name, false)?;
        if self.catalog.kind(kind).is_some_and(|info| info.is_abstract) {
            return Err(LightupError::catalog_error(format!(
                "Kind '{name}' is abstract"
            )));
        }
        self.inner.start_node(kind.into());
        Ok(self)
    }

    /// Add a token of the named kind with explicit text
    pub fn token(&mut self, name: &str, text: &str) -> Result<&mut Self> {
        let kind = self.resolve(name, true)?;
        self.inner.token(kind.into(), text);
        Ok(self)
    }

    /// Add a punctuation or keyword token using its fixed catalog text
    pub fn fixed_token(&mut self, name: &str) -> Result<&mut Self> {
        let kind = self.resolve(name, true)?;
        let text = self
            .catalog
            .kind(kind)
            .and_then(|info| info.text.clone())
            .ok_or_else(|| {
                LightupError::catalog_error(format!("Token kind '{name}' has no fixed text"))
            })?;
        self.inner.token(kind.into(), &text);
        Ok(self)
    }

    /// Finish the current node
    pub fn finish_node(&mut self) -> &mut Self {
        self.inner.finish_node();
        self
    }

    /// Finish building and return the green root
    pub fn finish_green(self) -> GreenNode {
        self.inner.finish()
    }

    /// Finish building and return a red root
    pub fn finish(self) -> SyntaxNode {
        SyntaxNode::new_root(self.finish_green())
    }

    fn resolve(&self, name: &str, token: bool) -> Result<RawKind> {
        let kind = match self.catalog.lookup_kind(name) {
            KindLookup::Found(kind) => kind,
            KindLookup::Missing => {
                return Err(LightupError::catalog_error(format!(
                    "Unknown kind '{name}' in catalog {}",
                    self.catalog.version()
                )));
            }
            KindLookup::Ambiguous(candidates) => {
                return Err(LightupError::AmbiguousKind {
                    name: name.to_string(),
                    version: self.catalog.version().to_string(),
                    candidates: candidates
                        .into_iter()
                        .map(|raw| self.catalog.kind_name(raw))
                        .collect(),
                });
            }
        };

        let is_token = self.catalog.kind(kind).is_some_and(|info| info.is_token);
        if is_token != token {
            let expected = if token { "token" } else { "node" };
            return Err(LightupError::catalog_error(format!(
                "Kind '{name}' is not a {expected} kind"
            )));
        }
        Ok(kind)
    }
}
