//! Stable per-file identifiers for item-like AST nodes.
//!
//! A rowan tree's identity is the tree itself; nothing survives a reparse.
//! `AstIdMap` gives item-like nodes (classes, methods, fields, ...) a stable
//! integer id within one parse, so later stages (`ItemTree`, diagnostics) can
//! refer back to a declaration without holding onto the node itself.

use std::marker::PhantomData;

use autoimport_syntax::{AstNode, SyntaxKind, SyntaxNode};

fn is_item_like(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CLASS_DECL
            | SyntaxKind::INTERFACE_DECL
            | SyntaxKind::ENUM_DECL
            | SyntaxKind::ANNOTATION_DECL
            | SyntaxKind::METHOD_DECL
            | SyntaxKind::CONSTRUCTOR_DECL
            | SyntaxKind::FIELD_DECL
    )
}

/// An untyped, file-local id produced by [`AstIdMap`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawAstId(u32);

/// A typed id for an item-like node of kind `N`.
///
/// `N` only disambiguates at the type level which [`AstNode`] the id is
/// expected to resolve to; the id itself carries no type information.
pub struct AstId<N> {
    raw: RawAstId,
    _phantom: PhantomData<fn() -> N>,
}

impl<N> AstId<N> {
    fn new(raw: RawAstId) -> Self {
        Self {
            raw,
            _phantom: PhantomData,
        }
    }
}

impl<N> std::fmt::Debug for AstId<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AstId({})", self.raw.0)
    }
}

impl<N> Copy for AstId<N> {}
impl<N> Clone for AstId<N> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<N> Eq for AstId<N> {}
impl<N> PartialEq for AstId<N> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
impl<N> std::hash::Hash for AstId<N> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<N: AstNode> AstId<N> {
    /// Resolve this id back to its node. Panics if `map` was not the map this
    /// id was produced from, or if the node at this index is not of kind `N`.
    pub fn to_node(self, map: &AstIdMap) -> N {
        N::cast(map.get_raw(self.raw)).expect("AstId resolved to a node of the wrong kind")
    }
}

/// Assigns stable ids to every item-like node in a single parsed file.
pub struct AstIdMap {
    arena: Vec<SyntaxNode>,
}

impl AstIdMap {
    pub fn new(root: &SyntaxNode) -> Self {
        let arena = root
            .preorder()
            .filter_map(|event| match event {
                rowan::WalkEvent::Enter(node) if is_item_like(node.kind()) => Some(node),
                _ => None,
            })
            .collect();
        Self { arena }
    }

    /// The id of `node`, if `node` belongs to the tree this map was built
    /// from and is item-like.
    pub fn ast_id<N: AstNode>(&self, node: &N) -> Option<AstId<N>> {
        let syntax = node.syntax();
        self.arena
            .iter()
            .position(|n| n == syntax)
            .map(|i| AstId::new(RawAstId(i as u32)))
    }

    fn get_raw(&self, raw: RawAstId) -> SyntaxNode {
        self.arena[raw.0 as usize].clone()
    }
}
