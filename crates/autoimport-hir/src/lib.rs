//! High-level IR: stable AST ids and a flat item tree, sitting between the
//! syntax layer and resolution.
//!
//! Method and constructor bodies are intentionally not lowered into a
//! separate representation — the scanner operates directly over the AST View
//! for everything below item granularity.

mod ast_id;
mod item_tree;

pub use ast_id::{AstId, AstIdMap, RawAstId};
pub use item_tree::{
    lower_item_tree, ClassItem, ClassItemIdx, ClassKind, ImportItem, ImportKind, ItemTree,
};
