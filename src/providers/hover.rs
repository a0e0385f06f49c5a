//! Hover cards for component names and prop names.

use serde::Serialize;

use crate::catalog::docs::{component_markdown, prop_markdown};
use crate::catalog::Catalog;
use crate::document::{Position, Range, TextDocument};
use crate::language::SyntaxContext;
use crate::scan::{
    rails_component_at, rails_prop_at, react_component_at, react_prop_at,
    resolve_enclosing_component,
};
use crate::utils::camel_to_snake;

/// Markdown to render at the hover site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hover {
    pub contents: String,
    pub range: Range,
}

/// The hover card for the token at `position`, if it is a known component
/// name or a recognized prop of the enclosing component.
pub fn hover_for_position(
    document: &TextDocument,
    position: Position,
    catalog: &Catalog,
) -> Option<Hover> {
    // Component names first: a name token can never also be a prop.
    if let Some(occurrence) = rails_component_at(document, position) {
        let (_, component) = catalog.by_rails_name(&occurrence.component_name)?;
        return Some(Hover {
            contents: component_markdown(&occurrence.component_name, component, catalog),
            range: occurrence.name_range,
        });
    }
    if let Some(occurrence) = react_component_at(document, position) {
        let (_, component) = catalog.by_react_name(&occurrence.component_name)?;
        return Some(Hover {
            contents: component_markdown(&occurrence.component_name, component, catalog),
            range: occurrence.name_range,
        });
    }

    let enclosing = resolve_enclosing_component(document, position)?;
    let (prop_at, component, lookup_name) = match enclosing.syntax {
        SyntaxContext::Rails => {
            let prop_at = rails_prop_at(document, position)?;
            let (_, component) = catalog.by_rails_name(&enclosing.component_name)?;
            let name = prop_at.name.clone();
            (prop_at, component, name)
        }
        SyntaxContext::React => {
            let prop_at = react_prop_at(document, position)?;
            let (_, component) = catalog.by_react_name(&enclosing.component_name)?;
            let name = camel_to_snake(&prop_at.name);
            (prop_at, component, name)
        }
    };

    let resolved = catalog.resolve_prop(component, &lookup_name)?;
    Some(Hover {
        contents: prop_markdown(&prop_at.name, resolved.prop, resolved.is_global),
        range: prop_at.range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::sample_catalog;

    fn erb(text: &str) -> TextDocument {
        TextDocument::new("file:///sample.html.erb", "html.erb", 1, text)
    }

    fn tsx(text: &str) -> TextDocument {
        TextDocument::new("file:///sample.tsx", "typescriptreact", 1, text)
    }

    fn hover(document: &TextDocument, position: Position) -> Option<Hover> {
        hover_for_position(document, position, &sample_catalog())
    }

    #[test]
    fn test_rails_component_hover() {
        let doc = erb(r#"<%= pb_rails("button", props: {}) %>"#);
        let hover = hover(&doc, Position::new(0, 16)).unwrap();
        assert!(hover.contents.starts_with("# button"));
        assert!(hover.contents.contains("Buttons are used for actions."));
        assert_eq!(hover.range, Range::on_line(0, 14, 20));
    }

    #[test]
    fn test_react_component_hover_uses_tag_name() {
        let doc = tsx("<FlexItem grow />");
        let hover = hover(&doc, Position::new(0, 4)).unwrap();
        assert!(hover.contents.starts_with("# FlexItem"));
        assert!(hover.contents.contains("</FlexItem>"));
    }

    #[test]
    fn test_unknown_component_has_no_hover() {
        let doc = erb(r#"<%= pb_rails("widget", props: {}) %>"#);
        assert_eq!(hover(&doc, Position::new(0, 16)), None);
    }

    #[test]
    fn test_rails_prop_hover() {
        let doc = erb(r#"<%= pb_rails("button", props: { variant: "primary" }) %>"#);
        let hover = hover(&doc, Position::new(0, 34)).unwrap();
        assert!(hover.contents.starts_with("**variant**"));
        assert!(hover.contents.contains("`primary`, `secondary`, `link`"));
        assert_eq!(hover.range, Range::on_line(0, 32, 39));
    }

    #[test]
    fn test_global_prop_hover_is_marked() {
        let doc = erb(r#"<%= pb_rails("button", props: { margin: "sm" }) %>"#);
        let hover = hover(&doc, Position::new(0, 34)).unwrap();
        assert!(hover.contents.starts_with("**margin** *(global prop)*"));
    }

    #[test]
    fn test_react_prop_hover_keeps_camel_title() {
        let doc = tsx(r#"<Button htmlType="submit" />"#);
        let hover = hover(&doc, Position::new(0, 10)).unwrap();
        assert!(hover.contents.starts_with("**htmlType**"));
        assert!(hover.contents.contains("Type: `string`"));
    }

    #[test]
    fn test_unknown_prop_has_no_hover() {
        let doc = erb(r#"<%= pb_rails("button", props: { colour: "red" }) %>"#);
        assert_eq!(hover(&doc, Position::new(0, 34)), None);
    }

    #[test]
    fn test_plain_text_has_no_hover() {
        let doc = erb("just words");
        assert_eq!(hover(&doc, Position::new(0, 3)), None);
    }
}
