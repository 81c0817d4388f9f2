//! Member accessors
//!
//! A [`RawAccessor`] is the cached, untyped pair of callables for one
//! (kind, member): `get` locates the member's child element inside an owner
//! node, `with` produces a copy of the owner with that child replaced,
//! inserted or removed. [`MemberAccessor`] is the typed view handed out to
//! callers; it converts between child elements and values through
//! [`SlotValue`] and costs nothing beyond an `Arc` clone.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rowan::{GreenNode, GreenToken, NodeOrToken};
use semver::Version;

use super::LightupRegistry;
use crate::catalog::{ListShape, MemberShape, SyntaxCatalog, ValueShape};
use crate::error::LightupError;
use crate::result::Result;
use crate::tree::{
    GreenElement, RawKind, SyntaxElement, SyntaxNode, SyntaxToken, node_green, rebuild,
    token_green,
};

type GetFn = dyn Fn(&SyntaxNode) -> Result<Option<SyntaxElement>> + Send + Sync;
type WithFn = dyn Fn(&SyntaxNode, Option<GreenElement>) -> Result<SyntaxNode> + Send + Sync;

/// Why an accessor degrades to defaults and no-op updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    /// The owner kind is absent from the loaded host
    KindAbsent,
    /// The member was introduced after the loaded host version
    RequiresVersion { since: Version, loaded: Version },
    /// The loaded catalog has the kind but not the member
    MissingMember,
}

/// Cached pair of callables bound to one (kind, member)
pub struct RawAccessor {
    kind: String,
    member: String,
    shape: Option<MemberShape>,
    unsupported: Option<Unsupported>,
    get: Box<GetFn>,
    with: Box<WithFn>,
}

impl RawAccessor {
    /// Build the pass-through accessor for an absent kind
    pub(crate) fn unsupported(kind: &str, member: &str, reason: Unsupported) -> Self {
        Self {
            kind: kind.to_string(),
            member: member.to_string(),
            shape: None,
            unsupported: Some(reason),
            get: Box::new(|_| Ok(None)),
            with: Box::new(|owner, _| Ok(owner.clone())),
        }
    }

    /// Build the pass-through accessor for a missing member of a present kind
    ///
    /// Owners are still checked against the kind.
    pub(crate) fn degraded(
        catalog: Arc<dyn SyntaxCatalog>,
        kind: &str,
        owner: RawKind,
        member: &str,
        reason: Unsupported,
    ) -> Self {
        let get_catalog = Arc::clone(&catalog);
        let with_catalog = catalog;
        Self {
            kind: kind.to_string(),
            member: member.to_string(),
            shape: None,
            unsupported: Some(reason),
            get: Box::new(move |node| {
                check_owner(get_catalog.as_ref(), owner, node)?;
                Ok(None)
            }),
            with: Box::new(move |node, _| {
                check_owner(with_catalog.as_ref(), owner, node)?;
                Ok(node.clone())
            }),
        }
    }

    /// Build an accessor bound to a member slot of a present kind
    pub(crate) fn bound(
        catalog: Arc<dyn SyntaxCatalog>,
        kind: &str,
        owner: RawKind,
        member: &str,
        shape: MemberShape,
        layout: Vec<MemberShape>,
        ordinal: usize,
    ) -> Self {
        let slot = Arc::new(Slot {
            catalog,
            owner,
            shape: shape.clone(),
            layout,
            ordinal,
        });

        let get_slot = Arc::clone(&slot);
        let with_slot = slot;
        Self {
            kind: kind.to_string(),
            member: member.to_string(),
            shape: Some(shape),
            unsupported: None,
            get: Box::new(move |owner| {
                get_slot.check_owner(owner)?;
                Ok(get_slot.locate(owner).map(|(_, element)| element))
            }),
            with: Box::new(move |owner, value| {
                with_slot.check_owner(owner)?;
                with_slot.write(owner, value)
            }),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    /// Resolved slot shape, `None` for unsupported accessors
    pub fn shape(&self) -> Option<&MemberShape> {
        self.shape.as_ref()
    }

    pub fn is_supported(&self) -> bool {
        self.unsupported.is_none()
    }

    pub fn unsupported_reason(&self) -> Option<&Unsupported> {
        self.unsupported.as_ref()
    }

    /// Locate the member's child element in `owner`
    pub fn get(&self, owner: &SyntaxNode) -> Result<Option<SyntaxElement>> {
        (self.get)(owner)
    }

    /// Copy `owner` with the member set to `value`, or removed for `None`
    pub fn with(&self, owner: &SyntaxNode, value: Option<GreenElement>) -> Result<SyntaxNode> {
        (self.with)(owner, value)
    }
}

impl fmt::Debug for RawAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawAccessor")
            .field("kind", &self.kind)
            .field("member", &self.member)
            .field("shape", &self.shape)
            .field("unsupported", &self.unsupported)
            .finish_non_exhaustive()
    }
}

/// Where a member lives inside its owner node
struct Slot {
    catalog: Arc<dyn SyntaxCatalog>,
    owner: RawKind,
    shape: MemberShape,
    /// Shapes of every member of the owner in layout order
    layout: Vec<MemberShape>,
    /// Position of this member in `layout`
    ordinal: usize,
}

/// Children of an owner with the child index of each member present
struct Assignment {
    children: Vec<SyntaxElement>,
    members: Vec<Option<usize>>,
}

impl Slot {
    fn check_owner(&self, owner: &SyntaxNode) -> Result<()> {
        check_owner(self.catalog.as_ref(), self.owner, owner)
    }

    fn matches(&self, shape: &MemberShape, element: &SyntaxElement) -> bool {
        match (shape, element) {
            (MemberShape::Token { kind }, NodeOrToken::Token(token)) => token.kind() == *kind,
            (MemberShape::Node { kind }, NodeOrToken::Node(node)) => {
                self.catalog.is_assignable(node.kind(), *kind)
            }
            (MemberShape::SeparatedList(list), NodeOrToken::Node(node)) => {
                node.kind() == list.list_kind
            }
            _ => false,
        }
    }

    fn is_trivia(&self, element: &SyntaxElement) -> bool {
        element
            .as_token()
            .is_some_and(|token| self.catalog.is_trivia(token.kind()))
    }

    /// Walk the children in layout order, giving each the next member it fits
    ///
    /// Members missing from the owner are skipped, so two members of the same
    /// shape bind to distinct children. Children that fit no remaining member
    /// belong to none.
    fn assign(&self, owner: &SyntaxNode) -> Assignment {
        let children: Vec<SyntaxElement> = owner.children_with_tokens().collect();
        let mut members = vec![None; self.layout.len()];
        let mut next = 0;
        for (index, element) in children.iter().enumerate() {
            if self.is_trivia(element) {
                continue;
            }
            let remaining = self.layout.get(next..).unwrap_or(&[]);
            if let Some(offset) = remaining
                .iter()
                .position(|shape| self.matches(shape, element))
            {
                members[next + offset] = Some(index);
                next += offset + 1;
            }
        }
        Assignment { children, members }
    }

    fn locate(&self, owner: &SyntaxNode) -> Option<(usize, SyntaxElement)> {
        let assignment = self.assign(owner);
        let index = assignment.members.get(self.ordinal).copied().flatten()?;
        let element = assignment.children.get(index)?.clone();
        Some((index, element))
    }

    /// Position right after the last child of a preceding member
    fn insertion_index(&self, assignment: &Assignment) -> usize {
        let preceding = assignment.members.get(..self.ordinal).unwrap_or(&[]);
        let Some(last) = preceding.iter().flatten().copied().max() else {
            return 0;
        };

        // Trivia following a member stays attached to it
        let trivia = assignment
            .children
            .get(last + 1..)
            .unwrap_or(&[])
            .iter()
            .take_while(|element| self.is_trivia(element))
            .count();
        last + 1 + trivia
    }

    fn write(&self, owner: &SyntaxNode, value: Option<GreenElement>) -> Result<SyntaxNode> {
        let value = value.map(|value| self.prepare(value)).transpose()?;
        let assignment = self.assign(owner);
        let located = assignment.members.get(self.ordinal).copied().flatten();

        let updated = match (located, value) {
            (Some(index), Some(value)) => rebuild(owner, |children| children[index] = value),
            (Some(index), None) => rebuild(owner, |children| {
                children.remove(index);
            }),
            (None, Some(value)) => {
                let index = self.insertion_index(&assignment);
                rebuild(owner, |children| children.insert(index, value))
            }
            (None, None) => owner.clone(),
        };
        Ok(updated)
    }

    /// Check a value against the slot and normalize list values
    fn prepare(&self, value: GreenElement) -> Result<GreenElement> {
        match (&self.shape, value) {
            (MemberShape::Token { kind }, NodeOrToken::Token(token))
                if RawKind::from(token.kind()) == *kind =>
            {
                Ok(NodeOrToken::Token(token))
            }
            (MemberShape::Node { kind }, NodeOrToken::Node(node))
                if self.catalog.is_assignable(node.kind().into(), *kind) =>
            {
                Ok(NodeOrToken::Node(node))
            }
            (MemberShape::SeparatedList(list), NodeOrToken::Node(node)) => {
                Ok(NodeOrToken::Node(self.normalize_list(list, &node)))
            }
            (shape, value) => {
                let actual = match &value {
                    NodeOrToken::Node(node) => RawKind::from(node.kind()),
                    NodeOrToken::Token(token) => RawKind::from(token.kind()),
                };
                let expected = match shape {
                    MemberShape::Token { kind } | MemberShape::Node { kind } => *kind,
                    MemberShape::SeparatedList(list) => list.list_kind,
                };
                Err(LightupError::kind_mismatch(
                    self.catalog.kind_name(actual),
                    self.catalog.kind_name(expected),
                ))
            }
        }
    }

    /// Give a list value the slot's list kind and separator tokens
    fn normalize_list(&self, list: &ListShape, green: &GreenNode) -> GreenNode {
        let children: Vec<GreenElement> = green
            .children()
            .map(|child| match child {
                NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
                NodeOrToken::Token(token) => {
                    let kind = RawKind::from(token.kind());
                    if kind == list.separator_kind || self.catalog.is_trivia(kind) {
                        NodeOrToken::Token(token.to_owned())
                    } else {
                        NodeOrToken::Token(GreenToken::new(
                            list.separator_kind.into(),
                            &list.separator_text,
                        ))
                    }
                }
            })
            .collect();
        GreenNode::new(list.list_kind.into(), children)
    }
}

fn check_owner(catalog: &dyn SyntaxCatalog, expected: RawKind, owner: &SyntaxNode) -> Result<()> {
    if catalog.is_assignable(owner.kind(), expected) {
        Ok(())
    } else {
        Err(LightupError::kind_mismatch(
            catalog.kind_name(owner.kind()),
            catalog.kind_name(expected),
        ))
    }
}

/// Value that can be read from and written to a member slot
pub trait SlotValue<'r>: Sized {
    /// Shape of member this value type binds to
    const SHAPE: ValueShape;

    /// Value reported when the member is absent
    fn empty(registry: &'r LightupRegistry) -> Self;

    /// Convert the located child element into a value
    fn read(
        registry: &'r LightupRegistry,
        shape: &MemberShape,
        element: SyntaxElement,
    ) -> Result<Self>;

    /// Green storage to write, `None` to remove the member
    fn to_green(&self) -> Option<GreenElement>;
}

impl<'r> SlotValue<'r> for Option<SyntaxToken> {
    const SHAPE: ValueShape = ValueShape::Token;

    fn empty(_registry: &'r LightupRegistry) -> Self {
        None
    }

    fn read(
        registry: &'r LightupRegistry,
        _shape: &MemberShape,
        element: SyntaxElement,
    ) -> Result<Self> {
        match element {
            NodeOrToken::Token(token) => Ok(Some(token)),
            NodeOrToken::Node(node) => Err(LightupError::kind_mismatch(
                registry.catalog().kind_name(node.kind()),
                ValueShape::Token.to_string(),
            )),
        }
    }

    fn to_green(&self) -> Option<GreenElement> {
        self.as_ref().map(|token| NodeOrToken::Token(token_green(token)))
    }
}

impl<'r> SlotValue<'r> for Option<SyntaxNode> {
    const SHAPE: ValueShape = ValueShape::Node;

    fn empty(_registry: &'r LightupRegistry) -> Self {
        None
    }

    fn read(
        registry: &'r LightupRegistry,
        _shape: &MemberShape,
        element: SyntaxElement,
    ) -> Result<Self> {
        match element {
            NodeOrToken::Node(node) => Ok(Some(node)),
            NodeOrToken::Token(token) => Err(LightupError::kind_mismatch(
                registry.catalog().kind_name(token.kind()),
                ValueShape::Node.to_string(),
            )),
        }
    }

    fn to_green(&self) -> Option<GreenElement> {
        self.as_ref().map(|node| NodeOrToken::Node(node_green(node)))
    }
}

/// Typed view over a cached [`RawAccessor`]
pub struct MemberAccessor<'r, V> {
    registry: &'r LightupRegistry,
    raw: Arc<RawAccessor>,
    _value: PhantomData<fn() -> V>,
}

impl<'r, V: SlotValue<'r>> MemberAccessor<'r, V> {
    pub(crate) fn new(registry: &'r LightupRegistry, raw: Arc<RawAccessor>) -> Self {
        Self {
            registry,
            raw,
            _value: PhantomData,
        }
    }

    /// Read the member of `owner`; absent members read as the empty value
    pub fn get(&self, owner: &SyntaxNode) -> Result<V> {
        match self.raw.get(owner)? {
            Some(element) => match self.raw.shape() {
                Some(shape) => V::read(self.registry, shape, element),
                None => Ok(V::empty(self.registry)),
            },
            None => Ok(V::empty(self.registry)),
        }
    }

    /// Copy `owner` with the member set to `value`
    pub fn with_value(&self, owner: &SyntaxNode, value: &V) -> Result<SyntaxNode> {
        self.raw.with(owner, value.to_green())
    }

    pub fn is_supported(&self) -> bool {
        self.raw.is_supported()
    }

    /// The shared cached accessor behind this view
    pub fn raw(&self) -> &Arc<RawAccessor> {
        &self.raw
    }
}

impl<V> Clone for MemberAccessor<'_, V> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            raw: Arc::clone(&self.raw),
            _value: PhantomData,
        }
    }
}

impl<V> fmt::Debug for MemberAccessor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemberAccessor").field(&self.raw).finish()
    }
}
