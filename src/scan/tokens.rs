//! Property Tokenizer: a single lazy pass over a delimited block.
//!
//! Yields `(name, rawValue)` pairs for the properties a human would read as
//! belonging directly to the invocation. Everything else in the block text,
//! such as keyword arguments of method-call values and the keys of nested
//! map literals, is skipped by depth tracking rather than parsed.

use std::sync::LazyLock;

use regex::Regex;

use super::PropsBlock;
use crate::language::SyntaxContext;

/// `name: value` pair in a helper props map. The value is one of a
/// double-quoted string, a single-quoted string, a bare token, or a lone
/// `{` opening a nested map.
static RAILS_PROP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+):\s*("([^"]*)"|'([^']*)'|([^,}\s]+)|\{)"#).unwrap());

/// `name="value"`, `name='value'`, or `name={expr}` tag attribute.
static REACT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=(?:"([^"]*)"|'([^']*)'|\{([^}]*)\})"#).unwrap());

/// Template keywords that match the `name:` shape but are never props.
const RESERVED_WORDS: [&str; 4] = ["do", "end", "if", "unless"];

/// One property token. Offsets are byte positions into the block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropToken {
    /// The name as written; camelCase attribute names are not normalized here.
    pub name: String,
    /// The raw value text. Quoted values keep their quotes, braced
    /// expressions keep their braces, and a nested map value is just `{`.
    pub raw_value: String,
    /// Offset of the name.
    pub offset: usize,
    /// Offset of the raw value.
    pub value_offset: usize,
    /// Whether the value is a nested map whose contents were skipped.
    pub has_nested_value: bool,
}

/// Tokenize a delimited block. The returned stream is lazy and single-pass.
pub fn tokenize(block: &PropsBlock, syntax: SyntaxContext) -> PropTokens<'_> {
    PropTokens {
        text: &block.text,
        syntax,
        cursor: 0,
        counted_to: 0,
        paren_depth: 0,
        brace_depth: 0,
    }
}

pub struct PropTokens<'a> {
    text: &'a str,
    syntax: SyntaxContext,
    /// Where the next pattern search starts.
    cursor: usize,
    /// How far depth counting has advanced; trails `cursor` by one match so
    /// skipped regions are still counted.
    counted_to: usize,
    paren_depth: i32,
    brace_depth: i32,
}

impl<'a> Iterator for PropTokens<'a> {
    type Item = PropToken;

    fn next(&mut self) -> Option<PropToken> {
        match self.syntax {
            SyntaxContext::Rails => self.next_rails(),
            SyntaxContext::React => self.next_react(),
        }
    }
}

impl<'a> PropTokens<'a> {
    fn next_rails(&mut self) -> Option<PropToken> {
        loop {
            let caps = RAILS_PROP_RE.captures_at(self.text, self.cursor)?;
            let whole = caps.get(0)?;

            self.count_depths(whole.start());

            let name = caps.get(1)?;
            let value = caps.get(2)?;
            self.cursor = whole.end();

            // A name starting inside parentheses belongs to a method-call
            // argument; inside braces, to a nested map that was not skipped
            // wholesale. Neither is a direct property.
            if self.paren_depth > 0 || self.brace_depth > 0 {
                continue;
            }

            if name.as_str() == "props" || RESERVED_WORDS.contains(&name.as_str()) {
                continue;
            }

            if value.as_str() == "{" {
                // The nested map's own keys are never direct properties;
                // jump the cursor past its matching close. The skipped text
                // still gets depth-counted from `counted_to`, which nets to
                // zero since the region is balanced.
                self.cursor = skip_nested_map(self.text, whole.end());
                return Some(PropToken {
                    name: name.as_str().to_string(),
                    raw_value: "{".to_string(),
                    offset: name.start(),
                    value_offset: value.start(),
                    has_nested_value: true,
                });
            }

            return Some(PropToken {
                name: name.as_str().to_string(),
                raw_value: value.as_str().to_string(),
                offset: name.start(),
                value_offset: value.start(),
                has_nested_value: false,
            });
        }
    }

    fn next_react(&mut self) -> Option<PropToken> {
        let caps = REACT_ATTR_RE.captures_at(self.text, self.cursor)?;
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        self.cursor = whole.end();

        // Reconstruct the value span including its quotes or braces so the
        // validator can anchor a diagnostic on the full literal.
        let inner = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?;
        let value_offset = inner.start() - 1;
        let raw_value = &self.text[value_offset..inner.end() + 1];

        Some(PropToken {
            name: name.as_str().to_string(),
            raw_value: raw_value.to_string(),
            offset: name.start(),
            value_offset,
            has_nested_value: false,
        })
    }

    /// Advance paren and brace depth over `text[counted_to..until]`.
    /// Brackets inside quoted strings do not count.
    fn count_depths(&mut self, until: usize) {
        let mut in_quote: Option<u8> = None;
        for &byte in &self.text.as_bytes()[self.counted_to..until] {
            if let Some(quote) = in_quote {
                if byte == quote {
                    in_quote = None;
                }
                continue;
            }
            match byte {
                b'"' | b'\'' => in_quote = Some(byte),
                b'(' => self.paren_depth += 1,
                b')' => self.paren_depth -= 1,
                b'{' => self.brace_depth += 1,
                b'}' => self.brace_depth -= 1,
                _ => {}
            }
        }
        self.counted_to = until;
    }
}

/// Position just past the `}` matching a nested map opened right before
/// `from`. Quoted braces do not count. Returns the text end if the map
/// never closes.
fn skip_nested_map(text: &str, from: usize) -> usize {
    let mut depth = 1i32;
    let mut in_quote: Option<u8> = None;
    let bytes = text.as_bytes();

    for (idx, &byte) in bytes.iter().enumerate().skip(from) {
        if let Some(quote) = in_quote {
            if byte == quote {
                in_quote = None;
            }
            continue;
        }
        match byte {
            b'"' | b'\'' => in_quote = Some(byte),
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return idx + 1;
                }
            }
            _ => {}
        }
    }
    text.len()
}
