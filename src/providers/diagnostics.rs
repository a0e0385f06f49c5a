//! Per-document diagnostic store.
//!
//! The host shows whatever set is current for a URI; every open or change
//! event replaces that set wholesale. There is no incremental diffing and
//! no per-diagnostic bookkeeping.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::document::TextDocument;
use crate::language::should_validate;
use crate::validate::{validate_document, Diagnostic};

/// The latest diagnostics for every open document.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    by_uri: HashMap<String, Vec<Diagnostic>>,
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-validate a document snapshot and replace its diagnostic set.
    ///
    /// Documents of unsupported languages get an empty set, which also
    /// clears any stale diagnostics left from a language-mode change.
    pub fn refresh(&mut self, document: &TextDocument, catalog: &Catalog) -> &[Diagnostic] {
        let diagnostics = if should_validate(&document.language_id) {
            validate_document(document, catalog)
        } else {
            Vec::new()
        };
        debug!(
            uri = %document.uri,
            count = diagnostics.len(),
            "replaced diagnostics"
        );
        let entry = self.by_uri.entry(document.uri.clone()).or_default();
        *entry = diagnostics;
        entry
    }

    /// The current set for a URI; empty if the document is unknown.
    pub fn get(&self, uri: &str) -> &[Diagnostic] {
        self.by_uri.get(uri).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop a closed document's diagnostics.
    pub fn remove(&mut self, uri: &str) {
        self.by_uri.remove(uri);
    }

    /// Drop everything, e.g. when the extension deactivates.
    pub fn clear(&mut self) {
        self.by_uri.clear();
    }

    pub fn document_count(&self) -> usize {
        self.by_uri.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::sample_catalog;

    fn erb(uri: &str, text: &str) -> TextDocument {
        TextDocument::new(uri, "html.erb", 1, text)
    }

    #[test]
    fn test_refresh_replaces_wholesale() {
        let catalog = sample_catalog();
        let mut store = DiagnosticStore::new();

        let broken = erb("file:///a.html.erb", r#"<%= pb_rails("buttom") %>"#);
        assert_eq!(store.refresh(&broken, &catalog).len(), 1);

        let fixed = erb("file:///a.html.erb", r#"<%= pb_rails("button") %>"#);
        assert_eq!(store.refresh(&fixed, &catalog).len(), 0);
        assert!(store.get("file:///a.html.erb").is_empty());
        assert_eq!(store.document_count(), 1);
    }

    #[test]
    fn test_documents_are_tracked_independently() {
        let catalog = sample_catalog();
        let mut store = DiagnosticStore::new();

        let first = erb("file:///a.html.erb", r#"<%= pb_rails("buttom") %>"#);
        let second = erb("file:///b.html.erb", r#"<%= pb_rails("button") %>"#);
        store.refresh(&first, &catalog);
        store.refresh(&second, &catalog);

        assert_eq!(store.get("file:///a.html.erb").len(), 1);
        assert_eq!(store.get("file:///b.html.erb").len(), 0);
        assert!(store.get("file:///missing.erb").is_empty());
    }

    #[test]
    fn test_unsupported_language_gets_empty_set() {
        let catalog = sample_catalog();
        let mut store = DiagnosticStore::new();

        let doc = TextDocument::new(
            "file:///notes.md",
            "markdown",
            1,
            r#"<%= pb_rails("buttom") %>"#,
        );
        assert!(store.refresh(&doc, &catalog).is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = sample_catalog();
        let mut store = DiagnosticStore::new();

        let doc = erb("file:///a.html.erb", r#"<%= pb_rails("buttom") %>"#);
        store.refresh(&doc, &catalog);
        store.remove("file:///a.html.erb");
        assert_eq!(store.document_count(), 0);

        store.refresh(&doc, &catalog);
        store.clear();
        assert!(store.get("file:///a.html.erb").is_empty());
    }
}
