// Playbook Core - component intelligence for the Playbook UI editor extension.
//
// The engine understands the narrow sublanguage of Playbook component
// usage: `pb_rails("kit", props: { ... })` helper calls in Rails templates
// and `<Kit prop="value" />` tags in React files. It scans raw document
// snapshots with window-bounded, regex-driven rules (no AST), validates
// what it finds against a JSON catalog produced by an offline sync step,
// and exposes completion, hover, definition, and diagnostics through a
// host-neutral dispatch layer.

pub mod bindings;
pub mod catalog;
pub mod document;
pub mod language;
pub mod providers;
pub mod scan;
pub mod utils;
pub mod validate;

pub use bindings::{DocumentItem, EditorRequest, EditorResponse, Engine};
pub use catalog::{load_catalog, load_form_builders, Catalog, CatalogError, CatalogPaths};
pub use document::{Position, Range, TextDocument};
pub use language::{should_validate, syntax_for_language, SyntaxContext};
pub use validate::{validate_document, Diagnostic, Severity};
