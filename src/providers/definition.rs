//! Go-to-definition for component names.
//!
//! Components have no local source to jump to; definition resolves to the
//! kit's page on the Playbook documentation site instead.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::document::{Position, Range, TextDocument};
use crate::language::SyntaxContext;
use crate::scan::{rails_component_at, react_component_at};

/// Base URL of the published kit documentation.
pub const KIT_DOCS_BASE_URL: &str = "https://playbook.powerhrg.com/kits";

/// A resolved definition target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

/// The documentation location for the component name at `position`.
pub fn definition_for_position(
    document: &TextDocument,
    position: Position,
    catalog: &Catalog,
) -> Option<Location> {
    let occurrence =
        rails_component_at(document, position).or_else(|| react_component_at(document, position))?;

    let found = match occurrence.syntax {
        SyntaxContext::Rails => catalog.by_rails_name(&occurrence.component_name),
        SyntaxContext::React => catalog.by_react_name(&occurrence.component_name),
    };
    let (_, component) = found?;

    Some(Location {
        uri: format!("{}/{}/react", KIT_DOCS_BASE_URL, component.rails_name),
        range: Range::on_line(0, 0, 0),
    })
}
