// Editor-facing providers.
//
// Thin adapters from the scanning and catalog layers to the result shapes
// an editor host consumes. Every provider is a pure function of a document
// snapshot, a position, and the catalog; none of them touch host APIs.

pub mod completion;
pub mod definition;
pub mod diagnostics;
pub mod hover;

pub use completion::{completions_for_position, CompletionItem, CompletionItemKind};
pub use definition::{definition_for_position, Location};
pub use diagnostics::DiagnosticStore;
pub use hover::{hover_for_position, Hover};
