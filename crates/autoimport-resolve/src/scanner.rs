//! The Unresolved-Identifier Scanner.
//!
//! Walks a parsed compilation unit building a [`crate::scope::ScopeTree`] as
//! it goes: every declaration site binds a name in the scope it opens, every
//! usage site looks the name up through the scope's ancestor chain, and
//! whatever is left unresolved when a scope closes bubbles into its parent.
//! Top-level and nested classes with an explicit `extends` clause are an
//! exception to bubbling — their residual unresolved set is sealed into an
//! [`OrphanClass`] instead, to be picked up later by the
//! [`crate::extender::ClassExtender`].

use autoimport_core::Name;
use autoimport_syntax::{
    AstNode, Block, ClassDecl, CompilationUnit, ConstructorDecl, Expr, FieldDecl, MethodDecl,
    Param, PathType, Stmt, SyntaxKind, SyntaxNode, SyntaxToken, TypeRef, VariableDeclarator,
};

use crate::entity::{ClassEntity, Entity, MethodEntity, TypeParamEntity, VarEntity, Visibility};
use crate::error::ResolveError;
use crate::scope::{ScopeId, ScopeTree};
use crate::selector::ClassSelector;

/// A class-like declaration with an explicit superclass, sealed off with
/// whatever its body left unresolved after its own members were accounted
/// for. The extender consumes these; the scanner never bubbles their
/// residual further, since a name unresolved inside an orphan might still be
/// a member inherited from a superclass the scanner knows nothing about.
#[derive(Debug, Clone)]
pub struct OrphanClass {
    pub name: Name,
    pub superclass: Option<ClassSelector>,
    pub unresolved: Vec<Name>,
}

/// The scanner's output: names left unresolved at file scope (after every
/// orphan class has sealed off its own residual), plus the orphan classes
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub unresolved: Vec<Name>,
    pub orphans: Vec<OrphanClass>,
}

/// Checked at every scope boundary the scanner opens, so a long-running scan
/// over a large file can be abandoned promptly.
pub trait CancellationToken {
    fn is_cancelled(&self) -> bool;
}

/// A token that never cancels, for callers that don't need one.
pub struct NeverCancelled;

impl CancellationToken for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

const PRIMITIVE_TYPE_NAMES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double", "void",
];

fn is_primitive_type_name(text: &str) -> bool {
    PRIMITIVE_TYPE_NAMES.contains(&text)
}

fn direct_ident_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
}

fn modifier_list_child(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind() == SyntaxKind::MODIFIER_LIST)
}

/// A class-like declaration's own modifiers and annotations are parsed as a
/// `MODIFIER_LIST` that closes before the declaration opens, so they show up
/// as the node's immediate preceding sibling rather than one of its children.
fn preceding_modifier_list(node: &SyntaxNode) -> Option<SyntaxNode> {
    let sibling = node.prev_sibling()?;
    (sibling.kind() == SyntaxKind::MODIFIER_LIST).then_some(sibling)
}

/// `CLASS_DECL`/`INTERFACE_DECL` members live under a `CLASS_BODY` child;
/// `ENUM_DECL` has no such wrapper and lists constants and members directly.
fn member_container(node: &SyntaxNode) -> SyntaxNode {
    match node.kind() {
        SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL => node
            .children()
            .find(|c| c.kind() == SyntaxKind::CLASS_BODY)
            .unwrap_or_else(|| node.clone()),
        _ => node.clone(),
    }
}

struct Scanner<'a> {
    scopes: ScopeTree,
    cancellation: &'a dyn CancellationToken,
    orphans: Vec<OrphanClass>,
}

/// Scans a compilation unit, returning every name left unresolved at file
/// scope plus any orphan classes found.
pub fn scan_compilation_unit(
    cu: &CompilationUnit,
    cancellation: &dyn CancellationToken,
) -> Result<ScanResult, ResolveError> {
    let mut scanner = Scanner {
        scopes: ScopeTree::new(),
        cancellation,
        orphans: Vec::new(),
    };
    let file_scope = scanner.open_scope(None)?;

    for import in cu.imports() {
        let Some(path) = import.path() else { continue };
        if import.is_on_demand() {
            continue;
        }
        let Some(last) = path.segments().last() else { continue };
        let Some(tok) = last.name() else { continue };
        let name = Name::new(tok.text());
        if import.is_static() {
            scanner.scopes.declare(
                file_scope,
                name.clone(),
                Entity::Variable(VarEntity { name, is_param: false }),
            );
        } else {
            scanner.scopes.declare(
                file_scope,
                name.clone(),
                Entity::Class(ClassEntity {
                    name,
                    kind: autoimport_hir::ClassKind::Class,
                }),
            );
        }
    }

    let top_level: Vec<SyntaxNode> = cu
        .classes()
        .map(|c| c.syntax().clone())
        .chain(cu.interfaces().map(|c| c.syntax().clone()))
        .chain(cu.enums().map(|c| c.syntax().clone()))
        .collect();

    for node in &top_level {
        scanner.predeclare_class_like(node, file_scope);
    }
    for node in &top_level {
        let own_modifiers = preceding_modifier_list(node);
        scanner.scan_class_like(node, file_scope, own_modifiers.as_ref())?;
    }

    let unresolved = scanner.scopes.unresolved(file_scope).to_vec();
    Ok(ScanResult {
        unresolved,
        orphans: scanner.orphans,
    })
}

impl<'a> Scanner<'a> {
    fn open_scope(&mut self, parent: Option<ScopeId>) -> Result<ScopeId, ResolveError> {
        if self.cancellation.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        Ok(self.scopes.push(parent))
    }

    fn lookup_and_record(&mut self, name: Name, scope: ScopeId) {
        if self.scopes.resolve(scope, &name).is_none() {
            self.scopes.record_unresolved(scope, name);
        }
    }

    fn class_kind_of(node: &SyntaxNode) -> autoimport_hir::ClassKind {
        use autoimport_hir::ClassKind;
        match node.kind() {
            SyntaxKind::CLASS_DECL => ClassKind::Class,
            SyntaxKind::INTERFACE_DECL => ClassKind::Interface,
            SyntaxKind::ENUM_DECL => ClassKind::Enum,
            _ => ClassKind::Class,
        }
    }

    /// Binds just the name of a class-like declaration (and, for a class
    /// body, every sibling member it will contain) into `scope`, before any
    /// body is scanned — this is what lets a method call forward reference a
    /// sibling declared later in the same class.
    fn predeclare_class_like(&mut self, node: &SyntaxNode, scope: ScopeId) {
        if let Some(name_tok) = direct_ident_token(node) {
            self.scopes.declare(
                scope,
                Name::new(name_tok.text()),
                Entity::Class(ClassEntity {
                    name: Name::new(name_tok.text()),
                    kind: Self::class_kind_of(node),
                }),
            );
        }
    }

    /// Scans a class/interface/enum-like declaration: opens its own scope,
    /// pre-declares every sibling member into it, then scans each member's
    /// body. If the declaration has an explicit superclass, its residual
    /// unresolved set is sealed into an [`OrphanClass`] instead of bubbling.
    ///
    /// `own_modifiers` is the declaration's own `@Annotation`/modifier list,
    /// if any — it's scanned against `parent_scope` since it sits lexically
    /// outside the class body it precedes.
    fn scan_class_like(
        &mut self,
        node: &SyntaxNode,
        parent_scope: ScopeId,
        own_modifiers: Option<&SyntaxNode>,
    ) -> Result<(), ResolveError> {
        if let Some(modifiers) = own_modifiers {
            self.scan_modifiers(modifiers, parent_scope)?;
        }

        let name = direct_ident_token(node).map(|t| t.text().to_string()).unwrap_or_default();
        let class_scope = self.open_scope(Some(parent_scope))?;

        if let Some(class) = ClassDecl::cast(node.clone()) {
            if let Some(type_params) = class.type_params() {
                for tp in type_params.type_params() {
                    if let Some(bound) = tp.bound() {
                        self.scan_type_ref(&bound, class_scope)?;
                    }
                    if let Some(tok) = tp.name() {
                        self.scopes.declare(
                            class_scope,
                            Name::new(tok.text()),
                            Entity::TypeParameter(TypeParamEntity { name: Name::new(tok.text()) }),
                        );
                    }
                }
            }
        }

        let container = member_container(node);
        let mut pending_type_params: Option<SyntaxNode> = None;
        let mut pending_modifiers: Option<SyntaxNode> = None;
        let mut members: Vec<(SyntaxNode, Option<SyntaxNode>, Option<SyntaxNode>)> = Vec::new();

        for child in container.children() {
            match child.kind() {
                SyntaxKind::MODIFIER_LIST => {
                    pending_modifiers = Some(child);
                    continue;
                }
                SyntaxKind::TYPE_PARAM_LIST => {
                    pending_type_params = Some(child);
                    continue;
                }
                SyntaxKind::FIELD_DECL => {
                    if let Some(field) = FieldDecl::cast(child.clone()) {
                        for decl in field.declarators() {
                            if let Some(n) = decl.name() {
                                self.scopes.declare(
                                    class_scope,
                                    Name::new(n.text()),
                                    Entity::Variable(VarEntity { name: Name::new(n.text()), is_param: false }),
                                );
                            }
                        }
                    }
                    members.push((child, None, pending_modifiers.take()));
                }
                SyntaxKind::METHOD_DECL => {
                    if let Some(m) = MethodDecl::cast(child.clone()) {
                        if let Some(n) = m.name() {
                            self.scopes.declare(
                                class_scope,
                                Name::new(n.text()),
                                Entity::Method(MethodEntity {
                                    name: Name::new(n.text()),
                                    visibility: Visibility::PackagePrivate,
                                }),
                            );
                        }
                    }
                    members.push((child, pending_type_params.take(), pending_modifiers.take()));
                }
                SyntaxKind::CONSTRUCTOR_DECL => {
                    members.push((child, pending_type_params.take(), pending_modifiers.take()));
                }
                SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL | SyntaxKind::ENUM_DECL => {
                    self.predeclare_class_like(&child, class_scope);
                    members.push((child, None, pending_modifiers.take()));
                }
                SyntaxKind::BLOCK => members.push((child, None, None)),
                SyntaxKind::VARIABLE_DECLARATOR => {
                    // Enum constant.
                    if let Some(decl) = VariableDeclarator::cast(child.clone()) {
                        if let Some(n) = decl.name() {
                            self.scopes.declare(
                                class_scope,
                                Name::new(n.text()),
                                Entity::Variable(VarEntity { name: Name::new(n.text()), is_param: false }),
                            );
                        }
                    }
                    members.push((child, None, None));
                }
                _ => {}
            }
            pending_type_params = None;
            pending_modifiers = None;
        }

        for (member, type_params, modifiers) in members {
            match member.kind() {
                SyntaxKind::FIELD_DECL => self.scan_field_initializers(&member, class_scope, modifiers.as_ref())?,
                SyntaxKind::METHOD_DECL => {
                    self.scan_method(&member, class_scope, type_params.as_ref(), modifiers.as_ref())?
                }
                SyntaxKind::CONSTRUCTOR_DECL => {
                    self.scan_constructor(&member, class_scope, type_params.as_ref(), modifiers.as_ref())?
                }
                SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL | SyntaxKind::ENUM_DECL => {
                    self.scan_class_like(&member, class_scope, modifiers.as_ref())?;
                }
                SyntaxKind::BLOCK => {
                    let block = Block::cast(member).expect("BLOCK kind casts to Block");
                    let s = self.scan_block_as_new_scope(&block, class_scope)?;
                    self.scopes.bubble_unresolved(s);
                }
                SyntaxKind::VARIABLE_DECLARATOR => {
                    for arg_list in member.children().filter(|c| c.kind() == SyntaxKind::ARG_LIST) {
                        for e in arg_list.children().filter_map(Expr::cast) {
                            self.scan_expr(e.syntax(), class_scope)?;
                        }
                    }
                    for body in member.children().filter(|c| c.kind() == SyntaxKind::CLASS_BODY) {
                        self.scan_anonymous_body(&body, class_scope)?;
                    }
                }
                _ => {}
            }
        }

        let extends_type = ClassDecl::cast(node.clone())
            .and_then(|c| c.extends_clause())
            .and_then(|ec| ec.types().next());
        let superclass = extends_type
            .as_ref()
            .and_then(ClassSelector::from_type_ref);
        if let Some(ty) = &extends_type {
            self.scan_type_ref(ty, class_scope)?;
        }

        if let Some(selector) = superclass {
            let unresolved = self.scopes.unresolved(class_scope).to_vec();
            self.orphans.push(OrphanClass {
                name: Name::new(name),
                superclass: Some(selector),
                unresolved,
            });
        } else {
            self.scopes.bubble_unresolved(class_scope);
        }

        Ok(())
    }

    fn scan_anonymous_body(&mut self, body: &SyntaxNode, parent_scope: ScopeId) -> Result<(), ResolveError> {
        // Anonymous class bodies are scanned as a plain block-like scope,
        // not as their own `OrphanClass` — there's no name for the extender
        // to key a superclass lookup on.
        let body_scope = self.open_scope(Some(parent_scope))?;
        for child in body.children() {
            match child.kind() {
                SyntaxKind::FIELD_DECL => {
                    if let Some(field) = FieldDecl::cast(child.clone()) {
                        for decl in field.declarators() {
                            if let Some(n) = decl.name() {
                                self.scopes.declare(
                                    body_scope,
                                    Name::new(n.text()),
                                    Entity::Variable(VarEntity { name: Name::new(n.text()), is_param: false }),
                                );
                            }
                        }
                    }
                }
                SyntaxKind::METHOD_DECL => {
                    if let Some(m) = MethodDecl::cast(child.clone()) {
                        if let Some(n) = m.name() {
                            self.scopes.declare(
                                body_scope,
                                Name::new(n.text()),
                                Entity::Method(MethodEntity { name: Name::new(n.text()), visibility: Visibility::PackagePrivate }),
                            );
                        }
                    }
                }
                _ => {}
            }
        }
        for child in body.children() {
            if child.kind() == SyntaxKind::METHOD_DECL {
                let modifiers = preceding_modifier_list(&child);
                self.scan_method(&child, body_scope, None, modifiers.as_ref())?;
            } else if child.kind() == SyntaxKind::FIELD_DECL {
                let modifiers = preceding_modifier_list(&child);
                self.scan_field_initializers(&child, body_scope, modifiers.as_ref())?;
            }
        }
        self.scopes.bubble_unresolved(body_scope);
        Ok(())
    }

    fn scan_field_initializers(
        &mut self,
        node: &SyntaxNode,
        scope: ScopeId,
        modifiers: Option<&SyntaxNode>,
    ) -> Result<(), ResolveError> {
        if let Some(modifiers) = modifiers {
            self.scan_modifiers(modifiers, scope)?;
        }
        let field = FieldDecl::cast(node.clone()).expect("FIELD_DECL kind casts to FieldDecl");
        if let Some(ty) = field.ty() {
            self.scan_type_ref(&ty, scope)?;
        }
        for decl in field.declarators() {
            for e in decl.syntax().children().filter_map(Expr::cast) {
                self.scan_expr(e.syntax(), scope)?;
            }
        }
        Ok(())
    }

    fn scan_method(
        &mut self,
        node: &SyntaxNode,
        class_scope: ScopeId,
        type_params: Option<&SyntaxNode>,
        modifiers: Option<&SyntaxNode>,
    ) -> Result<(), ResolveError> {
        if let Some(modifiers) = modifiers {
            self.scan_modifiers(modifiers, class_scope)?;
        }
        let method = MethodDecl::cast(node.clone()).expect("METHOD_DECL kind casts to MethodDecl");
        let method_scope = self.open_scope(Some(class_scope))?;
        self.declare_type_params(type_params, method_scope)?;

        if let Some(ret) = method.return_type() {
            self.scan_type_ref(&ret, method_scope)?;
        }
        if let Some(params) = method.params() {
            for p in params.params() {
                self.scan_param(&p, method_scope)?;
            }
        }
        if let Some(body) = method.body() {
            // The method body's top-level block shares the method's own
            // scope rather than opening a further nested one.
            self.scan_block_in_scope(&body, method_scope)?;
        }
        self.scopes.bubble_unresolved(method_scope);
        Ok(())
    }

    fn scan_constructor(
        &mut self,
        node: &SyntaxNode,
        class_scope: ScopeId,
        type_params: Option<&SyntaxNode>,
        modifiers: Option<&SyntaxNode>,
    ) -> Result<(), ResolveError> {
        if let Some(modifiers) = modifiers {
            self.scan_modifiers(modifiers, class_scope)?;
        }
        let ctor = ConstructorDecl::cast(node.clone()).expect("CONSTRUCTOR_DECL kind casts to ConstructorDecl");
        let ctor_scope = self.open_scope(Some(class_scope))?;
        self.declare_type_params(type_params, ctor_scope)?;

        if let Some(params) = ctor.params() {
            for p in params.params() {
                self.scan_param(&p, ctor_scope)?;
            }
        }
        if let Some(body) = ctor.body() {
            self.scan_block_in_scope(&body, ctor_scope)?;
        }
        self.scopes.bubble_unresolved(ctor_scope);
        Ok(())
    }

    fn declare_type_params(&mut self, type_params: Option<&SyntaxNode>, scope: ScopeId) -> Result<(), ResolveError> {
        let Some(list) = type_params else { return Ok(()) };
        for tp in list.children().filter(|c| c.kind() == SyntaxKind::TYPE_PARAM) {
            if let Some(bound) = tp.children().find_map(TypeRef::cast) {
                self.scan_type_ref(&bound, scope)?;
            }
            if let Some(tok) = direct_ident_token(&tp) {
                self.scopes.declare(
                    scope,
                    Name::new(tok.text()),
                    Entity::TypeParameter(TypeParamEntity { name: Name::new(tok.text()) }),
                );
            }
        }
        Ok(())
    }

    fn scan_param(&mut self, param: &Param, scope: ScopeId) -> Result<(), ResolveError> {
        if let Some(ml) = modifier_list_child(param.syntax()) {
            self.scan_modifiers(&ml, scope)?;
        }
        if let Some(ty) = param.ty() {
            self.scan_type_ref(&ty, scope)?;
        }
        if let Some(name_tok) = param.name() {
            self.scopes.declare(
                scope,
                Name::new(name_tok.text()),
                Entity::Variable(VarEntity { name: Name::new(name_tok.text()), is_param: true }),
            );
        }
        Ok(())
    }

    fn scan_block_as_new_scope(&mut self, block: &Block, parent: ScopeId) -> Result<ScopeId, ResolveError> {
        let scope = self.open_scope(Some(parent))?;
        self.scan_block_in_scope(block, scope)?;
        Ok(scope)
    }

    fn scan_block_in_scope(&mut self, block: &Block, scope: ScopeId) -> Result<(), ResolveError> {
        for stmt in block.statements() {
            self.scan_stmt(&stmt, scope)?;
        }
        Ok(())
    }

    fn scan_stmt(&mut self, stmt: &Stmt, scope: ScopeId) -> Result<(), ResolveError> {
        match stmt {
            Stmt::Block(b) => {
                let s = self.scan_block_as_new_scope(b, scope)?;
                self.scopes.bubble_unresolved(s);
            }
            Stmt::LocalVarDecl(decl) => {
                if let Some(ml) = modifier_list_child(decl.syntax()) {
                    self.scan_modifiers(&ml, scope)?;
                }
                if let Some(ty) = decl.ty() {
                    self.scan_type_ref(&ty, scope)?;
                }
                for d in decl.declarators() {
                    for e in d.syntax().children().filter_map(Expr::cast) {
                        self.scan_expr(e.syntax(), scope)?;
                    }
                    if let Some(name_tok) = d.name() {
                        self.scopes.declare(
                            scope,
                            Name::new(name_tok.text()),
                            Entity::Variable(VarEntity { name: Name::new(name_tok.text()), is_param: false }),
                        );
                    }
                }
            }
            Stmt::Other(node) => self.scan_other_stmt(node, scope)?,
        }
        Ok(())
    }

    fn scan_other_stmt(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        match node.kind() {
            SyntaxKind::FOR_STMT => self.scan_for_stmt(node, scope),
            SyntaxKind::FOR_EACH_STMT => self.scan_for_each_stmt(node, scope),
            SyntaxKind::TRY_STMT => self.scan_try_stmt(node, scope),
            SyntaxKind::SWITCH_STMT => self.scan_switch_stmt(node, scope),
            SyntaxKind::LOCAL_CLASS_STMT => self.scan_local_class_stmt(node, scope),
            _ => self.scan_generic_stmt_children(node, scope),
        }
    }

    /// Covers every statement whose direct children are just a mix of
    /// sub-statements and expressions to evaluate in the current scope:
    /// `if`/`while`/`do-while`/`return`/`throw`/`assert`/`yield`/expression
    /// statements and anything the dispatcher above doesn't special-case.
    fn scan_generic_stmt_children(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        for child in node.children() {
            if let Some(block) = Block::cast(child.clone()) {
                let s = self.scan_block_as_new_scope(&block, scope)?;
                self.scopes.bubble_unresolved(s);
            } else if let Some(stmt) = Stmt::cast(child.clone()) {
                self.scan_stmt(&stmt, scope)?;
            } else if let Some(e) = Expr::cast(child) {
                self.scan_expr(e.syntax(), scope)?;
            }
        }
        Ok(())
    }

    fn scan_for_stmt(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        let for_scope = self.open_scope(Some(scope))?;
        if let Some(decl) = node.children().find_map(autoimport_syntax::LocalVarDecl::cast) {
            if let Some(ty) = decl.ty() {
                self.scan_type_ref(&ty, for_scope)?;
            }
            for d in decl.declarators() {
                for e in d.syntax().children().filter_map(Expr::cast) {
                    self.scan_expr(e.syntax(), for_scope)?;
                }
                if let Some(name_tok) = d.name() {
                    self.scopes.declare(
                        for_scope,
                        Name::new(name_tok.text()),
                        Entity::Variable(VarEntity { name: Name::new(name_tok.text()), is_param: false }),
                    );
                }
            }
        }
        for e in node.children().filter_map(Expr::cast) {
            self.scan_expr(e.syntax(), for_scope)?;
        }
        if let Some(body) = node.children().filter_map(Stmt::cast).last() {
            self.scan_stmt(&body, for_scope)?;
        }
        self.scopes.bubble_unresolved(for_scope);
        Ok(())
    }

    fn scan_for_each_stmt(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        let for_scope = self.open_scope(Some(scope))?;
        if let Some(ty) = node.children().find_map(TypeRef::cast) {
            self.scan_type_ref(&ty, for_scope)?;
        }
        for e in node.children().filter_map(Expr::cast) {
            self.scan_expr(e.syntax(), for_scope)?;
        }
        if let Some(name_tok) = direct_ident_token(node) {
            self.scopes.declare(
                for_scope,
                Name::new(name_tok.text()),
                Entity::Variable(VarEntity { name: Name::new(name_tok.text()), is_param: true }),
            );
        }
        if let Some(body) = node.children().filter_map(Stmt::cast).last() {
            self.scan_stmt(&body, for_scope)?;
        }
        self.scopes.bubble_unresolved(for_scope);
        Ok(())
    }

    fn scan_try_stmt(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        let try_scope = self.open_scope(Some(scope))?;

        if let Some(resources) = node.children().find(|c| c.kind() == SyntaxKind::RESOURCE_LIST) {
            for resource in resources.children().filter(|c| c.kind() == SyntaxKind::RESOURCE) {
                if let Some(ml) = modifier_list_child(&resource) {
                    self.scan_modifiers(&ml, try_scope)?;
                }
                if let Some(ty) = resource.children().find_map(TypeRef::cast) {
                    self.scan_type_ref(&ty, try_scope)?;
                }
                for e in resource.children().filter_map(Expr::cast) {
                    self.scan_expr(e.syntax(), try_scope)?;
                }
                if let Some(name_tok) = direct_ident_token(&resource) {
                    self.scopes.declare(
                        try_scope,
                        Name::new(name_tok.text()),
                        Entity::Variable(VarEntity { name: Name::new(name_tok.text()), is_param: true }),
                    );
                }
            }
        }

        if let Some(try_block) = node.children().find_map(Block::cast) {
            self.scan_block_in_scope(&try_block, try_scope)?;
        }
        self.scopes.bubble_unresolved(try_scope);

        for catch in node.children().filter(|c| c.kind() == SyntaxKind::CATCH_CLAUSE) {
            let catch_scope = self.open_scope(Some(scope))?;
            if let Some(ml) = modifier_list_child(&catch) {
                self.scan_modifiers(&ml, catch_scope)?;
            }
            for ty in catch.children().filter_map(TypeRef::cast) {
                self.scan_type_ref(&ty, catch_scope)?;
            }
            if let Some(name_tok) = direct_ident_token(&catch) {
                self.scopes.declare(
                    catch_scope,
                    Name::new(name_tok.text()),
                    Entity::Variable(VarEntity { name: Name::new(name_tok.text()), is_param: true }),
                );
            }
            if let Some(block) = catch.children().find_map(Block::cast) {
                self.scan_block_in_scope(&block, catch_scope)?;
            }
            self.scopes.bubble_unresolved(catch_scope);
        }

        if let Some(finally_clause) = node.children().find(|c| c.kind() == SyntaxKind::FINALLY_CLAUSE) {
            if let Some(block) = finally_clause.children().find_map(Block::cast) {
                let s = self.scan_block_as_new_scope(&block, scope)?;
                self.scopes.bubble_unresolved(s);
            }
        }

        Ok(())
    }

    fn scan_switch_stmt(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        if let Some(target) = node.children().find_map(Expr::cast) {
            self.scan_expr(target.syntax(), scope)?;
        }
        // The whole switch body is a single scope: a local declared under
        // one case is visible to a later case (colon-style fallthrough) but
        // never escapes past the closing brace.
        let switch_scope = self.open_scope(Some(scope))?;
        for case in node.children().filter(|c| c.kind() == SyntaxKind::SWITCH_CASE) {
            for child in case.children() {
                if let Some(block) = Block::cast(child.clone()) {
                    let s = self.scan_block_as_new_scope(&block, switch_scope)?;
                    self.scopes.bubble_unresolved(s);
                } else if let Some(stmt) = Stmt::cast(child.clone()) {
                    self.scan_stmt(&stmt, switch_scope)?;
                } else if let Some(e) = Expr::cast(child) {
                    self.scan_expr(e.syntax(), switch_scope)?;
                }
            }
        }
        self.scopes.bubble_unresolved(switch_scope);
        Ok(())
    }

    fn scan_local_class_stmt(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        if let Some(class_decl) = node.children().find(|c| c.kind() == SyntaxKind::CLASS_DECL) {
            self.predeclare_class_like(&class_decl, scope);
            let own_modifiers = preceding_modifier_list(&class_decl);
            self.scan_class_like(&class_decl, scope, own_modifiers.as_ref())?;
        }
        Ok(())
    }

    fn scan_lambda(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        let lambda_scope = self.open_scope(Some(scope))?;
        if let Some(params) = node.children().find(|c| c.kind() == SyntaxKind::LAMBDA_PARAM_LIST) {
            for param in params.children().filter_map(Param::cast) {
                self.scan_param(&param, lambda_scope)?;
            }
        }
        if let Some(block) = node.children().find_map(Block::cast) {
            self.scan_block_in_scope(&block, lambda_scope)?;
        } else if let Some(expr) = node.children().find_map(Expr::cast) {
            self.scan_expr(expr.syntax(), lambda_scope)?;
        }
        self.scopes.bubble_unresolved(lambda_scope);
        Ok(())
    }

    fn scan_new_expr(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        for child in node.children() {
            if let Some(path) = PathType::cast(child.clone()) {
                self.scan_path_type(&path, scope)?;
            } else if child.kind() == SyntaxKind::ARG_LIST {
                for arg in child.children().filter_map(Expr::cast) {
                    self.scan_expr(arg.syntax(), scope)?;
                }
            } else if child.kind() == SyntaxKind::CLASS_BODY {
                self.scan_anonymous_body(&child, scope)?;
            } else if let Some(e) = Expr::cast(child) {
                self.scan_expr(e.syntax(), scope)?;
            }
        }
        Ok(())
    }

    /// Target + argument scan shared by `FIELD_ACCESS_EXPR` and
    /// `METHOD_CALL_EXPR`. Only the target subtree is recursed into — the
    /// member name trailing a `.` is never itself a lookup site, which is
    /// exactly what "first identifier segment" scanning needs for a dotted
    /// chain like `a.b.c()`: recursing into the target bottoms out at the
    /// leftmost `NAME_REF_EXPR` and no other segment is ever visited.
    fn scan_call_or_field_access(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        if let Some(target) = node.children().find_map(Expr::cast) {
            self.scan_expr(target.syntax(), scope)?;
        }
        if node.kind() == SyntaxKind::METHOD_CALL_EXPR {
            if let Some(args) = node.children().find(|c| c.kind() == SyntaxKind::ARG_LIST) {
                for arg in args.children().filter_map(Expr::cast) {
                    self.scan_expr(arg.syntax(), scope)?;
                }
            }
        }
        Ok(())
    }

    fn scan_expr(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        match node.kind() {
            SyntaxKind::NAME_REF_EXPR => {
                if let Some(tok) = direct_ident_token(node) {
                    self.lookup_and_record(Name::new(tok.text()), scope);
                }
            }
            SyntaxKind::THIS_EXPR => self.lookup_and_record(Name::new("this"), scope),
            SyntaxKind::SUPER_EXPR => self.lookup_and_record(Name::new("super"), scope),
            SyntaxKind::LITERAL_EXPR => {}
            SyntaxKind::LAMBDA_EXPR => self.scan_lambda(node, scope)?,
            SyntaxKind::NEW_EXPR => self.scan_new_expr(node, scope)?,
            SyntaxKind::FIELD_ACCESS_EXPR | SyntaxKind::METHOD_CALL_EXPR => {
                self.scan_call_or_field_access(node, scope)?
            }
            _ => {
                for child in node.children() {
                    if let Some(e) = Expr::cast(child.clone()) {
                        self.scan_expr(e.syntax(), scope)?;
                    } else if let Some(ty) = TypeRef::cast(child) {
                        self.scan_type_ref(&ty, scope)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn scan_path_type(&mut self, path: &PathType, scope: ScopeId) -> Result<(), ResolveError> {
        let mut segments = path.segments();
        if let Some(first) = segments.next() {
            if let Some(tok) = first.name() {
                if !is_primitive_type_name(tok.text()) {
                    self.lookup_and_record(Name::new(tok.text()), scope);
                }
            }
            if let Some(targs) = first.type_args() {
                for t in targs.type_refs() {
                    self.scan_type_ref(&t, scope)?;
                }
            }
        }
        // Later segments name a nested class or member of the first, not a
        // fresh lookup site — only their own generic type arguments (if any)
        // still need scanning.
        for seg in segments {
            if let Some(targs) = seg.type_args() {
                for t in targs.type_refs() {
                    self.scan_type_ref(&t, scope)?;
                }
            }
        }
        Ok(())
    }

    fn scan_type_ref(&mut self, type_ref: &TypeRef, scope: ScopeId) -> Result<(), ResolveError> {
        if let Some(path) = type_ref.path() {
            self.scan_path_type(&path, scope)?;
        }
        Ok(())
    }

    fn scan_annotation(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        if let Some(path) = node.children().find_map(PathType::cast) {
            self.scan_path_type(&path, scope)?;
        }
        if let Some(args) = node.children().find(|c| c.kind() == SyntaxKind::ANNOTATION_ARG_LIST) {
            for arg in args.children().filter(|c| c.kind() == SyntaxKind::ANNOTATION_ARG) {
                self.scan_annotation_value_children(&arg, scope)?;
            }
        }
        Ok(())
    }

    fn scan_annotation_value_children(&mut self, node: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        for child in node.children() {
            if child.kind() == SyntaxKind::ANNOTATION {
                self.scan_annotation(&child, scope)?;
            } else if let Some(e) = Expr::cast(child) {
                self.scan_expr(e.syntax(), scope)?;
            }
        }
        Ok(())
    }

    fn scan_modifiers(&mut self, modifiers: &SyntaxNode, scope: ScopeId) -> Result<(), ResolveError> {
        for annotation in modifiers.children().filter(|c| c.kind() == SyntaxKind::ANNOTATION) {
            self.scan_annotation(&annotation, scope)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoimport_syntax::{parse_java, SyntaxNode as RowanNode};

    fn scan(src: &str) -> ScanResult {
        let parse = parse_java(src);
        assert!(parse.errors.is_empty(), "unexpected parse errors: {:?}", parse.errors);
        let root = RowanNode::new_root(parse.green_node);
        let cu = CompilationUnit::cast(root).unwrap();
        scan_compilation_unit(&cu, &NeverCancelled).unwrap()
    }

    fn names(mut v: Vec<Name>) -> Vec<String> {
        v.sort();
        v.into_iter().map(|n| n.as_str().to_string()).collect()
    }

    #[test]
    fn forward_reference_to_sibling_method_resolves() {
        let result = scan("class T { int f(int b) { return g(b); } int g(int x) { return x; } }");
        assert!(result.unresolved.is_empty());
        assert!(result.orphans.is_empty());
    }

    #[test]
    fn for_and_for_each_loop_vars_do_not_leak() {
        let src = "class T { void m() { \
            for (int i = 0; i < 3; i = i + 1) { int b = i; staticFunction(b); } \
            for (boolean d : c) { boolean e = d; } \
        } }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["c", "staticFunction"]);
    }

    #[test]
    fn if_else_branch_locals_do_not_leak() {
        let src = "class T { void m() { \
            if (true) { int a = 1; } else { int b = 1; } \
            int result = a + b + c; \
        } }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["a", "b", "c"]);
    }

    #[test]
    fn catch_clause_locals_are_sealed_per_clause() {
        let src = "class T { void m() { \
            try { int a = 1; } \
            catch (SomeException e) { int b = 2; } \
            catch (Exception e) { int c = 3; } \
            finally { } \
            int result = a + b + c + e; \
        } }";
        let result = scan(src);
        assert_eq!(
            names(result.unresolved),
            vec!["Exception", "SomeException", "a", "b", "c", "e"]
        );
    }

    #[test]
    fn try_with_resources_variable_is_invisible_outside_try_block() {
        let src = "class T { void m() { \
            try (Res r = new Res()) { int a = 1; } \
            catch (SomeException e) { int b = 2; } \
            catch (Exception e) { int c = 3; } \
            finally { } \
            int result = a + b + c + e + r; \
        } } class Res {}";
        let result = scan(src);
        assert_eq!(
            names(result.unresolved),
            vec!["Exception", "SomeException", "a", "b", "c", "e", "r"]
        );
    }

    #[test]
    fn lambda_captures_enclosing_scope_but_params_stay_local() {
        let src = "class T { void m() { \
            int b = 1; \
            BiFunction<Integer, Integer, Integer> f = (x, y) -> x + y + b; \
            int z = f.apply(2, 3) + b; \
        } }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["BiFunction", "Integer"]);
    }

    #[test]
    fn method_level_type_parameter_resolves_in_signature_and_body() {
        let src = "class T { <T> T identity(T t) { R r = null; return t; } }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["R"]);
    }

    #[test]
    fn class_with_extends_seals_its_own_residual_into_an_orphan() {
        let src = "class Parent { int g() { return 1; } int h; int a; } \
                   class Child extends Parent { int f() { return g() + h + a + b; } }";
        let result = scan(src);
        assert!(result.unresolved.is_empty());
        assert_eq!(result.orphans.len(), 1);
        let child = &result.orphans[0];
        assert_eq!(child.name.as_str(), "Child");
        assert_eq!(child.superclass.as_ref().unwrap().to_string(), "Parent");
        assert_eq!(names(child.unresolved.clone()), vec!["a", "b", "g", "h"]);
    }

    #[test]
    fn annotation_on_a_class_field_and_method_is_a_usage_site() {
        let src = "@MyAnno class T { \
            @Deprecated int x; \
            @Override void m() {} \
        }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["Deprecated", "MyAnno", "Override"]);
    }

    #[test]
    fn constructor_annotation_is_a_usage_site() {
        let src = "class T { @MyAnno T(int n) {} }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["MyAnno"]);
    }

    #[test]
    fn this_and_super_are_always_unresolved() {
        let src = "class T { void m() { this.toString(); super.hashCode(); } }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["super", "this"]);
    }

    #[test]
    fn primitive_type_names_are_never_reported() {
        let src = "class T { void m() { int a = 1; boolean b = true; double d = 1.0; } }";
        let result = scan(src);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn switch_case_locals_are_visible_to_later_cases_but_not_after() {
        let src = "class T { void m(int x) { \
            switch (x) { \
                case 1: int a = 1; break; \
                case 2: int b = a; break; \
            } \
            int c = a; \
        } }";
        let result = scan(src);
        assert_eq!(names(result.unresolved), vec!["a"]);
    }
}
