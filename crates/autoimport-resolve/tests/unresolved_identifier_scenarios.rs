//! Exact scenarios the scanner and extender must reproduce verbatim, one
//! test per scenario, asserting the precise `unresolved` set each source
//! string produces.

use autoimport_core::Name;
use autoimport_hir::{lower_item_tree, AstIdMap};
use autoimport_resolve::{scan, ClassExtender, ClassHierarchy, NeverCancelled};
use autoimport_syntax::{parse_java, AstNode, CompilationUnit, SyntaxNode};

fn names(result: &autoimport_resolve::ScanResult) -> Vec<String> {
    let mut v: Vec<String> = result.unresolved.iter().map(|n| n.as_str().to_string()).collect();
    v.sort();
    v
}

fn sorted(mut v: Vec<Name>) -> Vec<String> {
    v.sort();
    v.into_iter().map(|n| n.as_str().to_string()).collect()
}

fn tree_from(text: &str) -> autoimport_hir::ItemTree {
    let parse = parse_java(text);
    let root = SyntaxNode::new_root(parse.green_node);
    let cu = CompilationUnit::cast(root).unwrap();
    let ast_id_map = AstIdMap::new(&root);
    lower_item_tree(&cu, &ast_id_map)
}

#[test]
fn two_methods_referencing_each_others_locals() {
    let src = "class T { void g(){ int c=f(b); } int f(int a){ int b=2; return a+b; } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&result), vec!["b"]);
}

#[test]
fn loop_scoped_bindings_escape_only_their_own_loop() {
    let src = "class T { void f(){ for(int i=0;i<10;i++){ int b=2; staticFunction(i+b);} int v=i+b; boolean[] c={true,false}; for(boolean d:c){ boolean e=d;} boolean f=e||d; } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&result), vec!["b", "d", "e", "i", "staticFunction"]);
}

#[test]
fn if_and_else_branch_locals_are_invisible_after_the_if() {
    let src = "class T { void m() { \
        if (true) { int a = 1; } else { int b = 1; } \
        int result = a + b + c; \
    } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&result), vec!["a", "b", "c"]);
}

#[test]
fn try_catch_finally_without_resources_seals_each_clauses_locals() {
    let src = "class T { void m() { \
        try { int a = 1; } \
        catch (SomeException e) { int b = 2; } \
        catch (Exception e) { int c = 3; } \
        finally { } \
        int result = a + b + c + e; \
    } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&result), vec!["Exception", "SomeException", "a", "b", "c", "e"]);
}

#[test]
fn try_with_resources_variable_is_invisible_outside_the_try_block() {
    let src = "class T { void m() { \
        try (Res r = new Res()) { int a = 1; } \
        catch (SomeException e) { int b = 2; } \
        catch (Exception e) { int c = 3; } \
        finally { } \
        int result = a + b + c + e + r; \
    } } class Res {}";
    let result = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&result), vec!["Exception", "SomeException", "a", "b", "c", "e", "r"]);
}

/// `Child extends Parent` and `OtherChild extends Child`: each orphan's own
/// residual is sealed separately, and only resolves against its ancestors
/// once the extender walks the chain.
#[test]
fn inheritance_chain_resolves_only_after_the_extender_consults_ancestors() {
    let src = "class Parent { int g() { return 1; } int h; int a; } \
               class Child extends Parent { int f() { return g() + h + a + b; } } \
               class OtherChild extends Child { int k() { return f() + n; } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert!(result.unresolved.is_empty());
    assert_eq!(result.orphans.len(), 2);

    let child = result.orphans.iter().find(|o| o.name.as_str() == "Child").unwrap();
    assert_eq!(sorted(child.unresolved.clone()), vec!["a", "b", "g", "h"]);
    let other_child = result.orphans.iter().find(|o| o.name.as_str() == "OtherChild").unwrap();
    assert_eq!(sorted(other_child.unresolved.clone()), vec!["f", "n"]);

    let tree = tree_from(src);
    let mut hierarchy = ClassHierarchy::new(None);
    hierarchy.add_item_tree(&tree);
    let mut extender = ClassExtender::new();

    let mut child = child.clone();
    let mut other_child = other_child.clone();
    extender.extend(&mut child, &hierarchy);
    extender.extend(&mut other_child, &hierarchy);

    let mut combined: Vec<Name> = child.unresolved.iter().chain(other_child.unresolved.iter()).cloned().collect();
    combined.sort();
    assert_eq!(
        combined.into_iter().map(|n| n.as_str().to_string()).collect::<Vec<_>>(),
        vec!["b", "n"]
    );

    // Extending against the same hierarchy a second time adds nothing further.
    let before = (child.unresolved.clone(), other_child.unresolved.clone());
    let result_child = extender.extend(&mut child, &hierarchy);
    let result_other = extender.extend(&mut other_child, &hierarchy);
    assert!(result_child.newly_resolved.is_empty());
    assert!(result_other.newly_resolved.is_empty());
    assert_eq!(before, (child.unresolved, other_child.unresolved));
}

#[test]
fn lambda_parameter_shadows_outer_name_only_inside_the_lambda() {
    let src = "class T { void m() { \
        int a=1; BiFunction<Integer,Integer,Integer> f=(b,c)->a+b+c; int d=f.apply(2,3)+b; \
    } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&result), vec!["BiFunction", "Integer", "b"]);
}

#[test]
fn generic_parameters_are_visible_in_their_own_declaration() {
    let src = "class T<R> { static <T> T f(T t){ R var=null; return t; } }";
    let result = scan(src, &NeverCancelled).unwrap();
    assert!(result.unresolved.is_empty());
}

/// Augmenting a compilation unit with a declaration that brings a previously
/// unresolved name into scope removes exactly that name from `unresolved`
/// and leaves everything else — including orphan residuals — unchanged.
#[test]
fn bringing_an_unresolved_name_into_scope_removes_only_that_name() {
    let src = "class T { void g(){ int c=f(b); } int f(int a){ int b=2; return a+b; } }";
    let before = scan(src, &NeverCancelled).unwrap();
    assert_eq!(names(&before), vec!["b"]);

    let augmented = format!("import static foo.Bar.b;\n{src}");
    let after = scan(&augmented, &NeverCancelled).unwrap();
    assert!(after.unresolved.is_empty());
    assert_eq!(after.orphans.len(), before.orphans.len());
}
