// Scanning layer: regex-driven extraction of component usages from raw text.
//
// There is no AST here on purpose. Templates mix Ruby, HTML, and JSX in ways
// no single grammar covers, so each scanning rule is a named function with a
// documented line window and an explicit give-up path. A scan that cannot
// find what it is looking for returns `None` and the caller skips that
// occurrence; nothing in this layer errors out.

pub mod block;
pub mod context;
pub mod tokens;

pub use block::{delimit_rails_props_block, delimit_react_attr_block};
pub use context::{
    completion_context, rails_component_at, rails_prop_at, react_component_at, react_prop_at,
    resolve_enclosing_component, CompletionContext, PropAtPosition,
};
pub use tokens::{tokenize, PropToken, PropTokens};

use crate::document::{Position, Range};
use crate::language::SyntaxContext;

/// Lines searched forward from an invocation for its `props:` marker.
pub const MARKER_SCAN_WINDOW: usize = 10;

/// Lines a property block may span before the scan gives up.
pub const BLOCK_SCAN_WINDOW: usize = 50;

/// Lines searched backward when resolving the enclosing component.
pub const CONTEXT_SCAN_WINDOW: u32 = 20;

/// The delimited property text of a single component usage.
///
/// `text` holds the block's constituent lines joined with `\n`, braces and
/// terminators excluded. Token offsets into `text` translate back to
/// absolute document positions through the recorded line lengths; only the
/// first line needs the extra column shift, every later line starts at
/// column zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropsBlock {
    pub text: String,
    pub start_line: u32,
    pub start_column: u32,
    line_lengths: Vec<usize>,
}

impl PropsBlock {
    pub fn new(lines: Vec<String>, start_line: u32, start_column: u32) -> Self {
        let line_lengths = lines.iter().map(|line| line.len()).collect();
        Self {
            text: lines.join("\n"),
            start_line,
            start_column,
            line_lengths,
        }
    }

    /// Map a byte offset in `text` to an absolute document position.
    ///
    /// Offsets past the end clamp to the end of the last line.
    pub fn position_of(&self, offset: usize) -> Position {
        let mut remaining = offset;
        for (idx, len) in self.line_lengths.iter().enumerate() {
            if remaining <= *len {
                let column = if idx == 0 {
                    self.start_column + remaining as u32
                } else {
                    remaining as u32
                };
                return Position::new(self.start_line + idx as u32, column);
            }
            // Consume the line and its joining newline.
            remaining -= len + 1;
        }

        let last = self.line_lengths.len().saturating_sub(1);
        let column = *self.line_lengths.last().unwrap_or(&0) as u32;
        Position::new(
            self.start_line + last as u32,
            if last == 0 { self.start_column + column } else { column },
        )
    }

    /// Map a byte span in `text` to an absolute document range.
    pub fn range_of(&self, offset: usize, len: usize) -> Range {
        Range::new(self.position_of(offset), self.position_of(offset + len))
    }
}

/// A component usage found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOccurrence {
    /// The name as written: snake_case for helper calls, PascalCase for tags.
    pub component_name: String,
    pub syntax: SyntaxContext,
    /// Span of the name token itself.
    pub name_range: Range,
}
