//! Context Resolver: which component usage encloses the cursor.
//!
//! Resolution is a backward line scan, not a parse. The nearest invocation
//! or opening tag within the window wins, which can mis-resolve in
//! pathological layouts (a closing brace formatted to look like a fresh
//! block); that limitation is accepted rather than papered over with
//! stricter rules that would change behavior on normal documents.

use std::sync::LazyLock;

use regex::Regex;

use super::{ComponentOccurrence, CONTEXT_SCAN_WINDOW};
use crate::document::{Position, Range, TextDocument};
use crate::language::SyntaxContext;

/// Helper invocation with its quoted component name.
pub(crate) static RAILS_INVOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"pb_rails\(\s*["']([^"']+)["']"#).unwrap());

/// Opening tag of a capitalized component.
pub(crate) static REACT_TAG_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][a-zA-Z0-9]*)").unwrap());

/// Opening or closing tag of a capitalized component.
static REACT_TAG_ANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?([A-Z][a-zA-Z0-9]*)").unwrap());

/// `name: value` pair, tolerant of a partially typed value. Braces are
/// excluded from the value class so a `props: {` marker never swallows the
/// pairs that follow it on the same line.
static RAILS_PROP_AT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+):\s*["']?([^"'{,}]+)["']?"#).unwrap());

/// `name:` followed by a partially typed value at the cursor. The map
/// opening brace is excluded from the value class so a cursor right after
/// `props: {` reads as a name position, not a value of `props` itself.
pub(crate) static RAILS_VALUE_AT_CURSOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+):\s*["']?([^"{,}]*)$"#).unwrap());

/// Attribute name followed by `=` and an optional opening quote or brace
/// at the cursor.
pub(crate) static REACT_VALUE_AT_CURSOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)\s*=\s*["'{]?([^"'}]*)$"#).unwrap());

/// `name="value"` or `name={expr}` attribute.
static REACT_PROP_AT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=(?:["']([^"']+)["']|\{([^}]+)\})"#).unwrap());

/// Find the component usage enclosing `position` by scanning backward.
///
/// Each line is tested for a helper invocation first and an opening tag
/// second; the first hit within the window is returned.
pub fn resolve_enclosing_component(
    document: &TextDocument,
    position: Position,
) -> Option<ComponentOccurrence> {
    let floor = position.line.saturating_sub(CONTEXT_SCAN_WINDOW);
    for line_idx in (floor..=position.line).rev() {
        let line = document.line(line_idx)?;

        if let Some(caps) = RAILS_INVOCATION_RE.captures(line) {
            let name = caps.get(1)?;
            return Some(ComponentOccurrence {
                component_name: name.as_str().to_string(),
                syntax: SyntaxContext::Rails,
                name_range: Range::on_line(line_idx, name.start() as u32, name.end() as u32),
            });
        }

        if let Some(caps) = REACT_TAG_OPEN_RE.captures(line) {
            let name = caps.get(1)?;
            return Some(ComponentOccurrence {
                component_name: name.as_str().to_string(),
                syntax: SyntaxContext::React,
                name_range: Range::on_line(line_idx, name.start() as u32, name.end() as u32),
            });
        }
    }
    None
}

/// The helper invocation whose name token contains `position`, if any.
pub fn rails_component_at(
    document: &TextDocument,
    position: Position,
) -> Option<ComponentOccurrence> {
    let line = document.line(position.line)?;
    for caps in RAILS_INVOCATION_RE.captures_iter(line) {
        let name = caps.get(1)?;
        if cursor_on(position, name.start(), name.end()) {
            return Some(ComponentOccurrence {
                component_name: name.as_str().to_string(),
                syntax: SyntaxContext::Rails,
                name_range: Range::on_line(position.line, name.start() as u32, name.end() as u32),
            });
        }
    }
    None
}

/// The tag (opening or closing) whose name contains `position`, if any.
pub fn react_component_at(
    document: &TextDocument,
    position: Position,
) -> Option<ComponentOccurrence> {
    let line = document.line(position.line)?;
    for caps in REACT_TAG_ANY_RE.captures_iter(line) {
        let name = caps.get(1)?;
        if cursor_on(position, name.start(), name.end()) {
            return Some(ComponentOccurrence {
                component_name: name.as_str().to_string(),
                syntax: SyntaxContext::React,
                name_range: Range::on_line(position.line, name.start() as u32, name.end() as u32),
            });
        }
    }
    None
}

/// A prop name found under the cursor, with its raw value if one is typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropAtPosition {
    pub name: String,
    pub range: Range,
    pub value: Option<String>,
}

/// The `name: value` pair whose name contains `position`, if any.
pub fn rails_prop_at(document: &TextDocument, position: Position) -> Option<PropAtPosition> {
    let line = document.line(position.line)?;
    for caps in RAILS_PROP_AT_RE.captures_iter(line) {
        let name = caps.get(1)?;
        if cursor_on(position, name.start(), name.end()) {
            return Some(PropAtPosition {
                name: name.as_str().to_string(),
                range: Range::on_line(position.line, name.start() as u32, name.end() as u32),
                value: caps.get(2).map(|v| v.as_str().trim().to_string()),
            });
        }
    }
    None
}

/// The attribute whose name contains `position`, if any.
pub fn react_prop_at(document: &TextDocument, position: Position) -> Option<PropAtPosition> {
    let line = document.line(position.line)?;
    for caps in REACT_PROP_AT_RE.captures_iter(line) {
        let name = caps.get(1)?;
        if cursor_on(position, name.start(), name.end()) {
            let value = caps.get(2).or_else(|| caps.get(3));
            return Some(PropAtPosition {
                name: name.as_str().to_string(),
                range: Range::on_line(position.line, name.start() as u32, name.end() as u32),
                value: value.map(|v| v.as_str().trim().to_string()),
            });
        }
    }
    None
}

/// The name token check is end inclusive so a cursor sitting just past the
/// last character still counts as "on" the name.
fn cursor_on(position: Position, start: usize, end: usize) -> bool {
    let character = position.character as usize;
    character >= start && character <= end
}

/// Where the cursor sits for completion purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    RailsComponentName,
    RailsPropName,
    RailsPropValue,
    ReactComponentName,
    ReactPropName,
    ReactPropValue,
}

static RAILS_COMPONENT_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"pb_rails\(\s*["']$"#).unwrap());

static PROPS_OPEN_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"props:\s*\{[^}]*$").unwrap());

static REACT_COMPONENT_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Z]?\w*$").unwrap());

static REACT_TAG_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][a-zA-Z0-9]*)\s+").unwrap());

static REACT_VALUE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\w+\s*=\s*["'{]?$"#).unwrap());

/// Classify the cursor position into one of the six completion contexts.
///
/// The current line's prefix drives most of the decision; only the "inside
/// a props map" question needs the backward brace scan, since the opening
/// brace may sit many lines up.
pub fn completion_context(
    document: &TextDocument,
    position: Position,
) -> Option<CompletionContext> {
    let prefix = document.line_prefix(position)?;

    if RAILS_COMPONENT_PREFIX_RE.is_match(prefix) {
        return Some(CompletionContext::RailsComponentName);
    }

    if PROPS_OPEN_PREFIX_RE.is_match(prefix) || in_props_map(document, position) {
        if RAILS_VALUE_AT_CURSOR_RE.is_match(prefix) {
            return Some(CompletionContext::RailsPropValue);
        }
        return Some(CompletionContext::RailsPropName);
    }

    if REACT_COMPONENT_PREFIX_RE.is_match(prefix) {
        return Some(CompletionContext::ReactComponentName);
    }

    if let Some(caps) = REACT_TAG_PREFIX_RE.captures(prefix) {
        let after_tag = &prefix[caps.get(1)?.end()..];
        if REACT_VALUE_PREFIX_RE.is_match(after_tag) {
            return Some(CompletionContext::ReactPropValue);
        }
        return Some(CompletionContext::ReactPropName);
    }

    None
}

/// Whether `position` sits inside an open `props: {` map.
///
/// Scans backward counting braces right to left; an unmatched `{` preceded
/// by the marker means yes, any other unmatched `{` means no. Hitting
/// another invocation line first also means no.
fn in_props_map(document: &TextDocument, position: Position) -> bool {
    let floor = position.line.saturating_sub(CONTEXT_SCAN_WINDOW);
    let mut closers = 0i32;

    for line_idx in (floor..=position.line).rev() {
        let Some(line) = document.line(line_idx) else {
            return false;
        };
        let search: &str = if line_idx == position.line {
            match document.line_prefix(position) {
                Some(prefix) => prefix,
                None => line,
            }
        } else {
            line
        };

        let bytes = search.as_bytes();
        let mut found = false;
        for i in (0..bytes.len()).rev() {
            match bytes[i] {
                b'}' => closers += 1,
                b'{' => {
                    closers -= 1;
                    if closers < 0 {
                        let before = search[..i].trim();
                        if before.ends_with("props:") {
                            found = true;
                            break;
                        }
                        return false;
                    }
                }
                _ => {}
            }
        }

        if found {
            return true;
        }

        if line.contains("pb_rails") {
            return false;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erb(text: &str) -> TextDocument {
        TextDocument::new("file:///sample.html.erb", "html.erb", 1, text)
    }

    fn tsx(text: &str) -> TextDocument {
        TextDocument::new("file:///sample.tsx", "typescriptreact", 1, text)
    }

    #[test]
    fn test_resolve_rails_invocation_on_current_line() {
        let doc = erb(r#"<%= pb_rails("button", props: { variant: "primary" }) %>"#);
        let found = resolve_enclosing_component(&doc, Position::new(0, 40)).unwrap();
        assert_eq!(found.component_name, "button");
        assert_eq!(found.syntax, SyntaxContext::Rails);
        assert_eq!(found.name_range, Range::on_line(0, 14, 20));
    }

    #[test]
    fn test_resolve_walks_backward_to_nearest() {
        let doc = erb("<%= pb_rails(\"card\", props: {\n  padding: \"md\",\n  selected: true\n}) %>");
        let found = resolve_enclosing_component(&doc, Position::new(2, 5)).unwrap();
        assert_eq!(found.component_name, "card");
        assert_eq!(found.name_range.start.line, 0);
    }

    #[test]
    fn test_resolve_react_tag() {
        let doc = tsx("<Flex orientation=\"row\">\n  \n</Flex>");
        let found = resolve_enclosing_component(&doc, Position::new(1, 1)).unwrap();
        assert_eq!(found.component_name, "Flex");
        assert_eq!(found.syntax, SyntaxContext::React);
    }

    #[test]
    fn test_resolve_respects_window() {
        let mut text = String::from("<%= pb_rails(\"button\", props: {\n");
        for _ in 0..25 {
            text.push_str("  text: \"x\",\n");
        }
        let doc = erb(&text);
        assert_eq!(resolve_enclosing_component(&doc, Position::new(26, 0)), None);
    }

    #[test]
    fn test_rails_component_at_name() {
        let doc = erb(r#"<%= pb_rails("button", props: {}) %>"#);
        assert!(rails_component_at(&doc, Position::new(0, 16)).is_some());
        assert!(rails_component_at(&doc, Position::new(0, 25)).is_none());
    }

    #[test]
    fn test_react_component_at_matches_closing_tag() {
        let doc = tsx("</Flex>");
        let found = react_component_at(&doc, Position::new(0, 3)).unwrap();
        assert_eq!(found.component_name, "Flex");
        assert_eq!(found.name_range, Range::on_line(0, 2, 6));
    }

    #[test]
    fn test_rails_prop_at() {
        let doc = erb(r#"  variant: "primary","#);
        let found = rails_prop_at(&doc, Position::new(0, 4)).unwrap();
        assert_eq!(found.name, "variant");
        assert_eq!(found.value.as_deref(), Some("primary"));
        assert!(rails_prop_at(&doc, Position::new(0, 15)).is_none());
    }

    #[test]
    fn test_rails_prop_at_on_single_line_invocation() {
        // The props: marker on the same line must not swallow the pairs.
        let doc = erb(r#"<%= pb_rails("button", props: { variant: "primary" }) %>"#);
        let found = rails_prop_at(&doc, Position::new(0, 34)).unwrap();
        assert_eq!(found.name, "variant");
        assert_eq!(found.range, Range::on_line(0, 32, 39));
    }

    #[test]
    fn test_react_prop_at() {
        let doc = tsx(r#"<Button htmlType="submit" count={3} />"#);
        let found = react_prop_at(&doc, Position::new(0, 10)).unwrap();
        assert_eq!(found.name, "htmlType");
        assert_eq!(found.value.as_deref(), Some("submit"));

        let braced = react_prop_at(&doc, Position::new(0, 28)).unwrap();
        assert_eq!(braced.name, "count");
        assert_eq!(braced.value.as_deref(), Some("3"));
    }

    #[test]
    fn test_completion_context_rails_component_name() {
        let doc = erb(r#"<%= pb_rails(""#);
        assert_eq!(
            completion_context(&doc, Position::new(0, 14)),
            Some(CompletionContext::RailsComponentName)
        );
    }

    #[test]
    fn test_completion_context_rails_prop_name_same_line() {
        let doc = erb(r#"<%= pb_rails("button", props: { "#);
        assert_eq!(
            completion_context(&doc, Position::new(0, 32)),
            Some(CompletionContext::RailsPropName)
        );
    }

    #[test]
    fn test_completion_context_rails_prop_name_multiline() {
        let doc = erb("<%= pb_rails(\"button\", props: {\n  text: \"Save\",\n  ");
        assert_eq!(
            completion_context(&doc, Position::new(2, 2)),
            Some(CompletionContext::RailsPropName)
        );
    }

    #[test]
    fn test_completion_context_rails_prop_value() {
        let doc = erb(r#"<%= pb_rails("button", props: { variant: ""#);
        assert_eq!(
            completion_context(&doc, Position::new(0, 43)),
            Some(CompletionContext::RailsPropValue)
        );
    }

    #[test]
    fn test_completion_context_closed_map_is_not_props() {
        let doc = erb("<%= pb_rails(\"button\", props: { text: \"x\" }) %>\n");
        assert_eq!(completion_context(&doc, Position::new(1, 0)), None);
    }

    #[test]
    fn test_completion_context_react_component_name() {
        let doc = tsx("<But");
        assert_eq!(
            completion_context(&doc, Position::new(0, 4)),
            Some(CompletionContext::ReactComponentName)
        );
        let bare = tsx("<");
        assert_eq!(
            completion_context(&bare, Position::new(0, 1)),
            Some(CompletionContext::ReactComponentName)
        );
    }

    #[test]
    fn test_completion_context_react_prop_name() {
        let doc = tsx("<Button ");
        assert_eq!(
            completion_context(&doc, Position::new(0, 8)),
            Some(CompletionContext::ReactPropName)
        );
    }

    #[test]
    fn test_completion_context_react_prop_value() {
        let doc = tsx(r#"<Button variant=""#);
        assert_eq!(
            completion_context(&doc, Position::new(0, 17)),
            Some(CompletionContext::ReactPropValue)
        );
        let braced = tsx("<Button size={");
        assert_eq!(
            completion_context(&braced, Position::new(0, 14)),
            Some(CompletionContext::ReactPropValue)
        );
    }

    #[test]
    fn test_completion_context_plain_text_is_none() {
        let doc = erb("plain text line");
        assert_eq!(completion_context(&doc, Position::new(0, 5)), None);
    }
}
