//! Core shared types: names, text positions, ids, diagnostics, and
//! filesystem helpers used across the workspace.
//!
//! This crate is intentionally small: no parsing, no resolution logic, just
//! the primitives every other crate builds on.

mod diagnostic;
mod fs;
mod id;
mod name;
mod panic_util;
mod path;
mod text;

pub use diagnostic::{Diagnostic, Location, RelatedDiagnostic, Severity};
pub use fs::{collect_files_with_extension, collect_java_files, max_modified_time};
pub use id::*;
pub use name::{InternedName, Name, NameInterner, PackageName, QualifiedName, SymbolName};
pub use panic_util::{panic_payload_to_str, panic_payload_to_string, NON_STRING_PANIC_PAYLOAD};
pub use path::{AbsPathBuf, AbsPathError};
pub use text::{LineCol, LineIndex, Position, Range, TextRange, TextSize};
