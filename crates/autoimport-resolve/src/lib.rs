//! Unresolved-identifier scanning and superclass-chain extension for a
//! single Java-like compilation unit.
//!
//! [`scan`] parses and walks one file's AST, returning every identifier left
//! unresolved at file scope plus a list of orphan classes (those with an
//! explicit superclass) whose own residual is sealed off separately.
//! [`ClassExtender`] then walks an orphan's superclass chain against a
//! [`ClassHierarchy`] built from sibling files and the dependency classpath,
//! shrinking its unresolved set one hop at a time.
#![forbid(unsafe_code)]

mod def_map;
mod entity;
mod error;
mod extender;
mod hierarchy;
mod scanner;
mod scope;
mod selector;

pub use def_map::DefMap;
pub use entity::{ClassEntity, Entity, MethodEntity, TypeParamEntity, VarEntity, Visibility};
pub use error::ResolveError;
pub use extender::{ClassExtender, ExtendResult};
pub use hierarchy::{ClassHierarchy, ResolvedClass};
pub use scanner::{scan_compilation_unit, CancellationToken, NeverCancelled, OrphanClass, ScanResult};
pub use scope::{ScopeData, ScopeId, ScopeTree};
pub use selector::ClassSelector;

use autoimport_syntax::{parse_java, AstNode, CompilationUnit, SyntaxNode};

/// Parses `source` and runs the unresolved-identifier scanner over it.
///
/// Returns [`ResolveError::ParseFailure`] if the source doesn't parse; the
/// scanner never produces a partial result over a syntactically broken file.
pub fn scan(source: &str, cancellation: &dyn CancellationToken) -> Result<ScanResult, ResolveError> {
    let parse = parse_java(source);
    if !parse.errors.is_empty() {
        return Err(ResolveError::ParseFailure(error::syntax_errors_to_diagnostics(&parse.errors)));
    }
    let root = SyntaxNode::new_root(parse.green_node);
    let Some(cu) = CompilationUnit::cast(root) else {
        return Err(ResolveError::InternalInvariantViolation {
            node_kind: "COMPILATION_UNIT".to_string(),
            path: "<root>".to_string(),
            message: "parse succeeded but root node is not a CompilationUnit".to_string(),
        });
    };
    scan_compilation_unit(&cu, cancellation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_reports_unresolved_identifiers() {
        let result = scan("class T { void m() { foo(); } }", &NeverCancelled).unwrap();
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].as_str(), "foo");
    }

    #[test]
    fn scan_rejects_unparseable_source() {
        let err = scan("class T { void m( {", &NeverCancelled).unwrap_err();
        assert!(matches!(err, ResolveError::ParseFailure(_)));
    }
}
