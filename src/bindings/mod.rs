// Host dispatch layer.
//
// The editor extension drives the engine through a small message table:
// each request carries a document snapshot (and a position where relevant)
// and maps to one pure provider call. The JSON wrapper lets any host
// transport (FFI, IPC, a node binding) use the engine without linking
// against its types.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::catalog::{load_catalog, Catalog, CatalogPaths};
use crate::document::{Position, TextDocument};
use crate::providers::{
    completions_for_position, definition_for_position, hover_for_position, CompletionItem,
    DiagnosticStore, Hover, Location,
};
use crate::validate::Diagnostic;

/// A document snapshot as the host sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub uri: String,
    pub language_id: String,
    pub version: i32,
    pub text: String,
}

impl From<DocumentItem> for TextDocument {
    fn from(item: DocumentItem) -> Self {
        TextDocument::new(item.uri, item.language_id, item.version, item.text)
    }
}

/// One editor event or request.
#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum EditorRequest {
    DidOpen {
        document: DocumentItem,
    },
    DidChange {
        document: DocumentItem,
    },
    DidClose {
        uri: String,
    },
    Completion {
        document: DocumentItem,
        position: Position,
    },
    Hover {
        document: DocumentItem,
        position: Position,
    },
    Definition {
        document: DocumentItem,
        position: Position,
    },
}

/// The result for a request, tagged for the host to route.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditorResponse {
    Diagnostics {
        uri: String,
        diagnostics: Vec<Diagnostic>,
    },
    Completions {
        items: Vec<CompletionItem>,
    },
    Hover {
        hover: Option<Hover>,
    },
    Definition {
        location: Option<Location>,
    },
    Closed {
        uri: String,
    },
}

/// The component intelligence engine, one per host process.
///
/// Owns the diagnostic store and a reference to the memoized catalog.
/// Requests are handled one at a time to completion; the pipeline below is
/// pure computation over the snapshot each request carries.
pub struct Engine<'c> {
    catalog: &'c Catalog,
    diagnostics: DiagnosticStore,
}

impl Engine<'static> {
    /// Build an engine over the process-wide catalog loaded from the
    /// extension's data directory. A missing catalog degrades to an empty
    /// one; the engine still answers requests, just with nothing to say.
    pub fn new(paths: &CatalogPaths) -> Self {
        Engine::with_catalog(load_catalog(paths))
    }
}

impl<'c> Engine<'c> {
    pub fn with_catalog(catalog: &'c Catalog) -> Self {
        Engine {
            catalog,
            diagnostics: DiagnosticStore::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn diagnostics(&self) -> &DiagnosticStore {
        &self.diagnostics
    }

    /// Dispatch one request to its handler.
    pub fn handle_request(&mut self, request: EditorRequest) -> EditorResponse {
        match request {
            EditorRequest::DidOpen { document } | EditorRequest::DidChange { document } => {
                let document: TextDocument = document.into();
                let diagnostics = self.diagnostics.refresh(&document, self.catalog).to_vec();
                EditorResponse::Diagnostics {
                    uri: document.uri,
                    diagnostics,
                }
            }
            EditorRequest::DidClose { uri } => {
                self.diagnostics.remove(&uri);
                EditorResponse::Closed { uri }
            }
            EditorRequest::Completion { document, position } => {
                let document: TextDocument = document.into();
                EditorResponse::Completions {
                    items: completions_for_position(&document, position, self.catalog),
                }
            }
            EditorRequest::Hover { document, position } => {
                let document: TextDocument = document.into();
                EditorResponse::Hover {
                    hover: hover_for_position(&document, position, self.catalog),
                }
            }
            EditorRequest::Definition { document, position } => {
                let document: TextDocument = document.into();
                EditorResponse::Definition {
                    location: definition_for_position(&document, position, self.catalog),
                }
            }
        }
    }

    /// String-in, string-out variant for hosts that speak JSON.
    pub fn handle_json(&mut self, request: &str) -> anyhow::Result<String> {
        let request: EditorRequest =
            serde_json::from_str(request).context("malformed editor request")?;
        let response = self.handle_request(request);
        serde_json::to_string(&response).context("unserializable editor response")
    }
}
