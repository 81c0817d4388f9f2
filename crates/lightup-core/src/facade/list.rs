//! Separated list facade
//!
//! A separated list is a list node whose children interleave element nodes
//! with separator tokens, possibly with trivia in between:
//!
//! ```text
//! TupleElementList
//!   TupleElement "int a"
//!   CommaToken ","
//!   Whitespace " "
//!   TupleElement "string b"
//! ```
//!
//! Elements are wrapped lazily on access. Every modification builds a new
//! list node from the green storage of the old one, keeps its trivia, and
//! keeps one separator fewer than elements (a trailing separator stays last).

use std::fmt;
use std::marker::PhantomData;

use rowan::{GreenNode, GreenToken, NodeOrToken};

use super::SyntaxWrapper;
use crate::catalog::{ListShape, MemberShape, ValueShape};
use crate::error::LightupError;
use crate::registry::{LightupRegistry, SlotValue};
use crate::result::Result;
use crate::tree::{
    GreenElement, RawKind, SyntaxElement, SyntaxNode, SyntaxToken, green_children, new_root,
    node_green, token_green,
};

/// Separator text used when a list knows neither its shape nor a separator
const DETACHED_SEPARATOR: &str = ",";

/// Role of one child of the list node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Element,
    Separator,
    Trivia,
}

/// Ordered, separated list of facades of type `T`
pub struct SeparatedList<'r, T> {
    registry: &'r LightupRegistry,
    node: Option<SyntaxNode>,
    shape: Option<ListShape>,
    _element: PhantomData<fn() -> T>,
}

impl<'r, T: SyntaxWrapper<'r>> SeparatedList<'r, T> {
    /// The empty list of an unknown or unsupported member
    pub fn empty(registry: &'r LightupRegistry) -> Self {
        Self {
            registry,
            node: None,
            shape: None,
            _element: PhantomData,
        }
    }

    /// An empty list that builds nodes of a known list shape
    pub fn with_shape(registry: &'r LightupRegistry, shape: ListShape) -> Self {
        Self {
            registry,
            node: None,
            shape: Some(shape),
            _element: PhantomData,
        }
    }

    /// Wrap an existing list node
    pub fn from_list_node(
        registry: &'r LightupRegistry,
        node: SyntaxNode,
        shape: Option<ListShape>,
    ) -> Self {
        Self {
            registry,
            node: Some(node),
            shape,
            _element: PhantomData,
        }
    }

    /// Underlying list node, if any
    pub fn node(&self) -> Option<&SyntaxNode> {
        self.node.as_ref()
    }

    pub fn shape(&self) -> Option<&ListShape> {
        self.shape.as_ref()
    }

    fn element_nodes(&self) -> impl Iterator<Item = SyntaxNode> + use<'r, T> {
        self.node.clone().into_iter().flat_map(|node| node.children())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.element_nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.element_nodes().next().is_none()
    }

    /// Wrap the element at `index`
    pub fn get(&self, index: usize) -> Result<Option<T>> {
        self.element_nodes()
            .nth(index)
            .map(|node| T::from_node(self.registry, Some(node)))
            .transpose()
    }

    pub fn first(&self) -> Result<Option<T>> {
        self.get(0)
    }

    pub fn last(&self) -> Result<Option<T>> {
        self.element_nodes()
            .last()
            .map(|node| T::from_node(self.registry, Some(node)))
            .transpose()
    }

    /// Wrap every element, failing on elements of another kind
    pub fn iter(&self) -> impl Iterator<Item = Result<T>> + use<'r, T> {
        let registry = self.registry;
        self.element_nodes()
            .map(move |node| T::from_node(registry, Some(node)))
    }

    /// Wrap the elements that are instances of `T`, skipping the others
    pub fn instances(&self) -> Result<Vec<T>> {
        let mut instances = Vec::new();
        for node in self.element_nodes() {
            if T::is_instance(self.registry, &node)? {
                instances.push(T::from_node(self.registry, Some(node))?);
            }
        }
        Ok(instances)
    }

    /// Position of the element wrapping the same node as `item`
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let target = item.node()?;
        self.element_nodes().position(|node| &node == target)
    }

    /// Separator tokens in order
    pub fn separators(&self) -> Vec<SyntaxToken> {
        self.entries()
            .into_iter()
            .filter(|(_, entry, _)| *entry == Entry::Separator)
            .filter_map(|(_, _, element)| element.into_token())
            .collect()
    }

    pub fn separator_count(&self) -> usize {
        self.separators().len()
    }

    pub fn separator(&self, index: usize) -> Option<SyntaxToken> {
        self.separators().into_iter().nth(index)
    }

    /// Append one element
    pub fn add(&self, item: T) -> Self {
        self.add_range([item])
    }

    /// Append elements; wrappers without a node contribute nothing
    pub fn add_range(&self, items: impl IntoIterator<Item = T>) -> Self {
        let greens = Self::item_greens(items);
        if greens.is_empty() {
            return self.clone();
        }

        let separator = NodeOrToken::Token(self.separator_green());
        let mut children = self.node.as_ref().map(green_children).unwrap_or_default();
        let last_element = self
            .entries()
            .into_iter()
            .filter(|(_, entry, _)| *entry == Entry::Element)
            .map(|(index, _, _)| index)
            .last();

        match last_element {
            Some(last) => {
                let inserted = greens
                    .into_iter()
                    .flat_map(|green| [separator.clone(), NodeOrToken::Node(green)]);
                children.splice(last + 1..last + 1, inserted);
            }
            None => {
                let mut inserted = Vec::with_capacity(greens.len() * 2);
                for (position, green) in greens.into_iter().enumerate() {
                    if position > 0 {
                        inserted.push(separator.clone());
                    }
                    inserted.push(NodeOrToken::Node(green));
                }
                children.extend(inserted);
            }
        }

        self.rebuilt(children)
    }

    /// Insert one element before position `index`
    pub fn insert(&self, index: usize, item: T) -> Result<Self> {
        self.insert_range(index, [item])
    }

    /// Insert elements before position `index`; `len()` appends
    pub fn insert_range(&self, index: usize, items: impl IntoIterator<Item = T>) -> Result<Self> {
        let len = self.len();
        if index > len {
            return Err(LightupError::IndexOutOfRange { index, len });
        }
        if index == len {
            return Ok(self.add_range(items));
        }

        let greens = Self::item_greens(items);
        if greens.is_empty() {
            return Ok(self.clone());
        }

        let separator = NodeOrToken::Token(self.separator_green());
        let mut children = self.node.as_ref().map(green_children).unwrap_or_default();
        let Some(at) = self.element_position(index) else {
            return Err(LightupError::IndexOutOfRange { index, len });
        };

        let inserted = greens
            .into_iter()
            .flat_map(|green| [NodeOrToken::Node(green), separator.clone()]);
        children.splice(at..at, inserted);

        Ok(self.rebuilt(children))
    }

    /// Remove the element at `index` together with one adjacent separator
    pub fn remove_at(&self, index: usize) -> Result<Self> {
        let len = self.len();
        let entries = self.entries();
        let Some(at) = self.element_position(index) else {
            return Err(LightupError::IndexOutOfRange { index, len });
        };

        let following = entries
            .iter()
            .skip_while(|(position, _, _)| *position <= at)
            .take_while(|(_, entry, _)| *entry != Entry::Element)
            .find(|(_, entry, _)| *entry == Entry::Separator);
        let preceding = entries
            .iter()
            .rev()
            .skip_while(|(position, _, _)| *position >= at)
            .take_while(|(_, entry, _)| *entry != Entry::Element)
            .find(|(_, entry, _)| *entry == Entry::Separator);
        let separator = following.or(preceding).map(|(position, _, _)| *position);

        let mut children = self.node.as_ref().map(green_children).unwrap_or_default();
        let mut removed: Vec<usize> = std::iter::once(at).chain(separator).collect();
        removed.sort_unstable_by(|a, b| b.cmp(a));
        for position in removed {
            children.remove(position);
        }

        Ok(self.rebuilt(children))
    }

    /// Green storage of the list node, empty when there is no node
    pub fn green(&self) -> GreenNode {
        match &self.node {
            Some(node) => node_green(node),
            None => GreenNode::new(self.list_kind().into(), Vec::<GreenElement>::new()),
        }
    }

    fn list_kind(&self) -> RawKind {
        match (&self.node, &self.shape) {
            (Some(node), _) => node.kind(),
            (None, Some(shape)) => shape.list_kind,
            (None, None) => RawKind::DETACHED,
        }
    }

    /// Separator for new elements: an existing one, the shape's, or a detached `,`
    fn separator_green(&self) -> GreenToken {
        if let Some(existing) = self.separators().first() {
            return token_green(existing);
        }
        match &self.shape {
            Some(shape) => GreenToken::new(shape.separator_kind.into(), &shape.separator_text),
            None => GreenToken::new(RawKind::DETACHED.into(), DETACHED_SEPARATOR),
        }
    }

    fn item_greens(items: impl IntoIterator<Item = T>) -> Vec<GreenNode> {
        items
            .into_iter()
            .filter_map(|item| item.node().map(node_green))
            .collect()
    }

    /// Child index of the element at `index`
    fn element_position(&self, index: usize) -> Option<usize> {
        self.entries()
            .into_iter()
            .filter(|(_, entry, _)| *entry == Entry::Element)
            .map(|(position, _, _)| position)
            .nth(index)
    }

    fn entries(&self) -> Vec<(usize, Entry, SyntaxElement)> {
        let Some(node) = &self.node else {
            return Vec::new();
        };
        let catalog = self.registry.catalog();
        node.children_with_tokens()
            .enumerate()
            .map(|(position, element)| {
                let entry = match &element {
                    NodeOrToken::Node(_) => Entry::Element,
                    NodeOrToken::Token(token) if catalog.is_trivia(token.kind()) => Entry::Trivia,
                    NodeOrToken::Token(_) => Entry::Separator,
                };
                (position, entry, element)
            })
            .collect()
    }

    fn rebuilt(&self, children: Vec<GreenElement>) -> Self {
        Self {
            registry: self.registry,
            node: Some(new_root(self.list_kind(), children)),
            shape: self.shape.clone(),
            _element: PhantomData,
        }
    }
}

impl<'r, T: SyntaxWrapper<'r>> SlotValue<'r> for SeparatedList<'r, T> {
    const SHAPE: ValueShape = ValueShape::SeparatedList;

    fn empty(registry: &'r LightupRegistry) -> Self {
        SeparatedList::empty(registry)
    }

    fn read(
        registry: &'r LightupRegistry,
        shape: &MemberShape,
        element: SyntaxElement,
    ) -> Result<Self> {
        let shape = match shape {
            MemberShape::SeparatedList(list) => Some(list.clone()),
            _ => None,
        };
        match element {
            NodeOrToken::Node(node) => Ok(SeparatedList::from_list_node(registry, node, shape)),
            NodeOrToken::Token(token) => Err(LightupError::kind_mismatch(
                registry.catalog().kind_name(token.kind()),
                ValueShape::SeparatedList.to_string(),
            )),
        }
    }

    fn to_green(&self) -> Option<GreenElement> {
        Some(NodeOrToken::Node(self.green()))
    }
}

impl<T> Clone for SeparatedList<'_, T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            node: self.node.clone(),
            shape: self.shape.clone(),
            _element: PhantomData,
        }
    }
}

impl<T> PartialEq for SeparatedList<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for SeparatedList<'_, T> {}

impl<T> fmt::Debug for SeparatedList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeparatedList")
            .field("node", &self.node)
            .field("shape", &self.shape)
            .finish()
    }
}
