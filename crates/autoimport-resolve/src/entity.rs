//! The things a scope can bind a name to.
//!
//! Kept as one tagged enum rather than four separate binding maps, per the
//! redesign note: callers that don't care which kind of entity a name
//! resolved to can match once on `Entity::name()` instead of threading four
//! lookup tables through the scanner.

use autoimport_core::Name;
use autoimport_hir::ClassKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

/// A class/interface/enum binding visible to the scanner. Unlike
/// [`autoimport_hir::ClassItem`], which indexes into an `ItemTree` for
/// signature-level queries, this carries only what a scope lookup needs to
/// know: that the name names a class, and what kind of class-like thing it
/// is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntity {
    pub name: Name,
    pub kind: ClassKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntity {
    pub name: Name,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarEntity {
    pub name: Name,
    /// `true` for fields and locals introduced by `final`-less declarations;
    /// params and catch-clause locals are never reassignable targets the
    /// scanner needs to distinguish, so this is advisory only.
    pub is_param: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamEntity {
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Class(ClassEntity),
    Method(MethodEntity),
    Variable(VarEntity),
    TypeParameter(TypeParamEntity),
}

impl Entity {
    pub fn name(&self) -> &Name {
        match self {
            Entity::Class(c) => &c.name,
            Entity::Method(m) => &m.name,
            Entity::Variable(v) => &v.name,
            Entity::TypeParameter(t) => &t.name,
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntity> {
        match self {
            Entity::Class(c) => Some(c),
            _ => None,
        }
    }
}
