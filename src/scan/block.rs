//! Block Delimiter: isolates the property text of a single component usage.
//!
//! Helper calls carry their props in a brace-delimited map after a literal
//! `props:` marker; tags carry attributes between the opening `<Name` and
//! the first unnested `>` or `/>`. Both scans are window-bounded and give
//! up with `None` instead of scanning an ill-formed document unboundedly.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{PropsBlock, BLOCK_SCAN_WINDOW, MARKER_SCAN_WINDOW};
use crate::document::TextDocument;

/// The `props:` marker opening a helper call's property map.
static PROPS_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"props:\s*\{").unwrap());

/// Any method call. Used to reject a marker that belongs to a call other
/// than the invocation being scanned.
static METHOD_CALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\(").unwrap());

/// Delimit the `props: { ... }` map of the helper invocation on `start_line`.
///
/// The marker is searched within a short forward window. A later line that
/// starts another `pb_rails(` aborts the search so a sibling's map is never
/// swallowed; a marker preceded by a different method call on its line is
/// skipped for the same reason. From the marker on, a signed brace counter
/// runs character by character until the map closes. The returned block
/// excludes both enclosing braces.
pub fn delimit_rails_props_block(
    document: &TextDocument,
    start_line: u32,
) -> Option<PropsBlock> {
    let mut marker: Option<(u32, usize)> = None;

    let marker_end = (start_line as usize + MARKER_SCAN_WINDOW).min(document.line_count() as usize);
    for i in start_line as usize..marker_end {
        let line = document.line(i as u32)?;

        if i > start_line as usize && line.contains("pb_rails(") {
            return None;
        }

        if let Some(m) = PROPS_MARKER_RE.find(line) {
            if i > start_line as usize {
                let before = &line[..m.start()];
                if METHOD_CALL_RE.is_match(before) && !before.contains("pb_rails(") {
                    continue;
                }
            }
            marker = Some((i as u32, m.end()));
            break;
        }
    }

    let (marker_line, marker_column) = marker?;

    let mut depth = 1i32;
    let mut collected: Vec<String> = Vec::new();

    let scan_end = (marker_line as usize + BLOCK_SCAN_WINDOW).min(document.line_count() as usize);
    for i in marker_line as usize..scan_end {
        let line = document.line(i as u32)?;
        let from = if i as u32 == marker_line { marker_column } else { 0 };
        let bytes = line.as_bytes();

        for j in from..bytes.len() {
            match bytes[j] {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        collected.push(line[from..j].to_string());
                        return Some(PropsBlock::new(
                            collected,
                            marker_line,
                            marker_column as u32,
                        ));
                    }
                }
                _ => {}
            }
        }

        collected.push(line[from..].to_string());
    }

    debug!(start_line, "props map did not close within the scan window");
    None
}

/// Delimit the attribute region of the tag whose name ends at
/// `(start_line, after_name_column)`.
///
/// The region runs to the first `>` or `/>` outside braces and quotes. A
/// nested capitalized tag seen before that ends the region immediately, so
/// a child's attributes are never attributed to an unclosed parent. The
/// returned block excludes the terminator and any trailing `/`.
pub fn delimit_react_attr_block(
    document: &TextDocument,
    start_line: u32,
    after_name_column: usize,
) -> Option<PropsBlock> {
    let mut collected: Vec<String> = Vec::new();
    let mut brace_depth = 0i32;
    let mut in_quote: Option<u8> = None;

    let scan_end = (start_line as usize + BLOCK_SCAN_WINDOW).min(document.line_count() as usize);
    for i in start_line as usize..scan_end {
        let line = document.line(i as u32)?;
        let from = if i as u32 == start_line { after_name_column } else { 0 };
        let bytes = line.as_bytes();

        for j in from..bytes.len() {
            let ch = bytes[j];

            if let Some(quote) = in_quote {
                if ch == quote {
                    in_quote = None;
                }
                continue;
            }

            match ch {
                b'"' | b'\'' => in_quote = Some(ch),
                b'{' => brace_depth += 1,
                b'}' => brace_depth -= 1,
                b'>' if brace_depth == 0 => {
                    let end = if j > from && bytes[j - 1] == b'/' { j - 1 } else { j };
                    collected.push(line[from..end].to_string());
                    return Some(PropsBlock::new(
                        collected,
                        start_line,
                        after_name_column as u32,
                    ));
                }
                b'<' if brace_depth == 0
                    && bytes.get(j + 1).is_some_and(|b| b.is_ascii_uppercase()) =>
                {
                    collected.push(line[from..j].to_string());
                    return Some(PropsBlock::new(
                        collected,
                        start_line,
                        after_name_column as u32,
                    ));
                }
                _ => {}
            }
        }

        collected.push(line[from..].to_string());
    }

    debug!(start_line, "tag attribute region did not close within the scan window");
    None
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
    fn test_rails_single_line_block() {
        let doc = erb(r#"<%= pb_rails("button", props: { variant: "primary" }) %>"#);
        let block = delimit_rails_props_block(&doc, 0).unwrap();
        assert_eq!(block.text, r#" variant: "primary" "#);
        assert_eq!(block.start_line, 0);
        assert_eq!(block.start_column, 31);
    }

    #[test]
    fn test_rails_empty_block() {
        let doc = erb(r#"<%= pb_rails("button", props: {}) %>"#);
        let block = delimit_rails_props_block(&doc, 0).unwrap();
        assert_eq!(block.text, "");
    }

    #[test]
    fn test_rails_multiline_block() {
        let doc = erb("<%= pb_rails(\"button\", props: {\n  text: \"Save\",\n  loading: true\n}) %>");
        let block = delimit_rails_props_block(&doc, 0).unwrap();
        assert_eq!(block.text, "\n  text: \"Save\",\n  loading: true\n");
        assert_eq!(block.start_line, 0);
    }

    #[test]
    fn test_rails_marker_on_a_later_line() {
        let doc = erb("<%= pb_rails(\"button\",\n      props: { text: \"Go\" }) %>");
        let block = delimit_rails_props_block(&doc, 0).unwrap();
        assert_eq!(block.text, " text: \"Go\" ");
        assert_eq!(block.start_line, 1);
        assert_eq!(block.start_column, 14);
    }

    #[test]
    fn test_rails_nested_map_stays_inside_block() {
        let doc = erb(r#"<%= pb_rails("card", props: { aria: { label: "x" }, selected: true }) %>"#);
        let block = delimit_rails_props_block(&doc, 0).unwrap();
        assert_eq!(block.text, r#" aria: { label: "x" }, selected: true "#);
    }

    #[test]
    fn test_rails_sibling_invocation_aborts() {
        let doc = erb("<%= pb_rails(\"button\") %>\n<%= pb_rails(\"title\", props: { size: \"1\" }) %>");
        assert_eq!(delimit_rails_props_block(&doc, 0), None);
    }

    #[test]
    fn test_rails_marker_of_another_call_is_skipped() {
        let doc = erb("<%= pb_rails(\"card\") %>\n<%= render_widget(props: { foo: \"bar\" }) %>");
        assert_eq!(delimit_rails_props_block(&doc, 0), None);
    }

    #[test]
    fn test_rails_unterminated_block_gives_up() {
        let mut text = String::from("<%= pb_rails(\"button\", props: {\n");
        for _ in 0..60 {
            text.push_str("  text: \"x\",\n");
        }
        let doc = erb(&text);
        assert_eq!(delimit_rails_props_block(&doc, 0), None);
    }

    #[test]
    fn test_rails_marker_outside_window_gives_up() {
        let mut text = String::from("<%= pb_rails(\"button\",\n");
        for _ in 0..12 {
            text.push('\n');
        }
        text.push_str("  props: { text: \"x\" }) %>");
        let doc = erb(&text);
        assert_eq!(delimit_rails_props_block(&doc, 0), None);
    }

    #[test]
    fn test_react_simple_tag() {
        let doc = tsx(r#"<Button variant="primary">Save</Button>"#);
        let block = delimit_react_attr_block(&doc, 0, 7).unwrap();
        assert_eq!(block.text, r#" variant="primary""#);
        assert_eq!(block.start_column, 7);
    }

    #[test]
    fn test_react_self_closing_tag_excludes_slash() {
        let doc = tsx(r#"<Button variant="primary" />"#);
        let block = delimit_react_attr_block(&doc, 0, 7).unwrap();
        assert_eq!(block.text, r#" variant="primary" "#);
    }

    #[test]
    fn test_react_multiline_attrs() {
        let doc = tsx("<Button\n  variant=\"primary\"\n  loading\n/>");
        let block = delimit_react_attr_block(&doc, 0, 7).unwrap();
        assert_eq!(block.text, "\n  variant=\"primary\"\n  loading\n");
    }

    #[test]
    fn test_react_brace_expression_hides_closer() {
        let doc = tsx(r#"<Button onClick={() => save()} disabled={count > 3}>Go</Button>"#);
        let block = delimit_react_attr_block(&doc, 0, 7).unwrap();
        assert_eq!(block.text, r#" onClick={() => save()} disabled={count > 3}"#);
    }

    #[test]
    fn test_react_quoted_closer_is_ignored() {
        let doc = tsx(r#"<Button text="a > b" />"#);
        let block = delimit_react_attr_block(&doc, 0, 7).unwrap();
        assert_eq!(block.text, r#" text="a > b" "#);
    }

    #[test]
    fn test_react_nested_component_ends_region() {
        let doc = tsx("<Flex orientation=\"row\"\n  <FlexItem grow />");
        let block = delimit_react_attr_block(&doc, 0, 5).unwrap();
        assert_eq!(block.text, " orientation=\"row\"\n  ");
    }

    #[test]
    fn test_react_lowercase_tag_does_not_end_region() {
        let doc = tsx(r#"<Button text="hi" aria={a < b}>"#);
        let block = delimit_react_attr_block(&doc, 0, 7).unwrap();
        assert_eq!(block.text, r#" text="hi" aria={a < b}"#);
    }

    #[test]
    fn test_react_unterminated_tag_gives_up() {
        let mut text = String::from("<Button\n");
        for _ in 0..60 {
            text.push_str("  variant=\"primary\"\n");
        }
        let doc = tsx(&text);
        assert_eq!(delimit_react_attr_block(&doc, 0, 7), None);
    }
}
