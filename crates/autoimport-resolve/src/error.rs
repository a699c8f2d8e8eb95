//! The three-kind error taxonomy the scanner and extender can raise.
//!
//! Everything else — unknown identifiers, missing superclasses, hierarchy
//! misses — is a normal outcome and surfaces as data, not as an error.

use autoimport_core::Diagnostic;
use autoimport_syntax::SyntaxError;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The parser reported diagnostics; the scanner produces no partial
    /// `ScanResult`.
    #[error("parse failed with {} diagnostic(s)", .0.len())]
    ParseFailure(Vec<Diagnostic>),

    /// A caller-supplied cancellation token fired.
    #[error("scan cancelled")]
    Cancelled,

    /// An unreachable branch in the scanner or extender. Fatal.
    #[error("internal invariant violated at {node_kind} ({path}): {message}")]
    InternalInvariantViolation {
        node_kind: String,
        path: String,
        message: String,
    },
}

pub(crate) fn syntax_errors_to_diagnostics(errors: &[SyntaxError]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|err| Diagnostic::new(err.range, autoimport_core::Severity::Error, err.message.clone()))
        .collect()
}
