//! Parser fixtures: source snippets checked either for a clean, error-free
//! parse or for specific shapes in the resulting tree.

use autoimport_syntax::{parse_java, Parse, SyntaxNode};

fn parse_ok(text: &str) -> Parse {
    let parse = parse_java(text);
    assert!(
        parse.errors.is_empty(),
        "unexpected parse errors for {text:?}: {:?}",
        parse.errors
    );
    parse
}

fn dump(text: &str) -> String {
    format!("{:#?}", SyntaxNode::new_root(parse_ok(text).green_node))
}

#[test]
fn package_import_class_field_method_round_trip() {
    let tree = dump("package com.example;\nimport java.util.List;\nimport java.util.*;\nclass Widget {\n  int count;\n  int total(int n) { return count + n; }\n}\n");
    assert!(tree.contains("PACKAGE_DECL"));
    assert!(tree.contains("IMPORT_DECL"));
    assert!(tree.contains("CLASS_DECL"));
    assert!(tree.contains("FIELD_DECL"));
    assert!(tree.contains("METHOD_DECL"));
}

#[test]
fn class_annotation_is_wrapped_in_a_modifier_list_sibling() {
    let tree = dump("@Deprecated\nclass Widget {\n}\n");
    assert!(tree.contains("MODIFIER_LIST"));
    assert!(tree.contains("ANNOTATION"));
    assert!(tree.contains("CLASS_DECL"));
}

#[test]
fn field_and_method_annotations_are_wrapped_in_modifier_lists() {
    let tree = dump("class Widget {\n  @Deprecated\n  int count;\n  @Override\n  public String toString() { return \"\"; }\n}\n");
    let modifier_lists = tree.matches("MODIFIER_LIST").count();
    assert!(modifier_lists >= 2, "expected a MODIFIER_LIST per annotated member:\n{tree}");
    assert!(tree.contains("ANNOTATION"));
}

#[test]
fn constructor_annotation_is_wrapped_in_a_modifier_list() {
    let tree = dump("class Widget {\n  @SuppressWarnings(\"unused\")\n  Widget(int n) {}\n}\n");
    assert!(tree.contains("MODIFIER_LIST"));
    assert!(tree.contains("CONSTRUCTOR_DECL"));
    assert!(tree.contains("ANNOTATION_ARG_LIST"));
}

#[test]
fn nested_class_with_its_own_annotation_parses_cleanly() {
    parse_ok("class Outer {\n  @Deprecated\n  static class Inner {\n    int x;\n  }\n}\n");
}

#[test]
fn generics_extends_and_implements_clauses_parse_cleanly() {
    parse_ok("interface Shape {}\nclass Box<T extends Number> extends AbstractBox implements Shape {\n  T value;\n}\n");
}

#[test]
fn enhanced_for_try_with_resources_and_lambda_parse_cleanly() {
    let tree = dump("class Pipeline {\n  void run() {\n    for (String s : names) {}\n    try (AutoCloseable c = open()) {} catch (Exception e) {} finally {}\n    Runnable r = () -> { doThing(); };\n  }\n}\n");
    assert!(tree.contains("RESOURCE"));
    assert!(tree.contains("CATCH_CLAUSE"));
    assert!(tree.contains("FINALLY_CLAUSE"));
}

#[test]
fn switch_arrow_and_colon_forms_parse_cleanly() {
    parse_ok("class C {\n  int m(int x) {\n    switch (x) {\n      case 1 -> { yield 1; }\n      default: return 0;\n    }\n    return 0;\n  }\n}\n");
}

#[test]
fn malformed_class_body_still_recovers_a_tree() {
    let parse = parse_java("class C { !!! }");
    assert!(!parse.errors.is_empty());
}

#[test]
fn enum_with_constants_and_body_parses_cleanly() {
    parse_ok("enum Direction {\n  NORTH, SOUTH, EAST, WEST;\n  boolean isVertical() { return this == NORTH || this == SOUTH; }\n}\n");
}
