//! Full-document validation.
//!
//! Every line is scanned for helper invocations and component tags; each
//! recognized usage gets its property block delimited, tokenized, and
//! checked against the catalog. The pass is pure: same snapshot and
//! catalog in, same diagnostics out, in document order.

use serde::{Deserialize, Serialize};

use crate::catalog::{is_always_valid_prop, Catalog, ComponentSchema};
use crate::document::{Range, TextDocument};
use crate::language::SyntaxContext;
use crate::scan::context::{RAILS_INVOCATION_RE, REACT_TAG_OPEN_RE};
use crate::scan::{
    delimit_rails_props_block, delimit_react_attr_block, tokenize, PropToken, PropsBlock,
};
use crate::utils::camel_to_snake;

/// Marker attached to every diagnostic so the host can attribute it.
pub const DIAGNOSTIC_SOURCE: &str = "Playbook";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// A single finding anchored to a span of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: Severity,
    pub source: String,
}

impl Diagnostic {
    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Warning,
            source: DIAGNOSTIC_SOURCE.to_string(),
        }
    }
}

/// Validate a full document snapshot against the catalog.
///
/// Helper invocations of unknown components are reported; unknown tags are
/// not, since capitalized tags in React files routinely name components
/// from other libraries.
pub fn validate_document(document: &TextDocument, catalog: &Catalog) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for line_idx in 0..document.line_count() {
        let Some(line) = document.line(line_idx) else {
            continue;
        };
        validate_rails_line(line, line_idx, document, catalog, &mut diagnostics);
        validate_react_line(line, line_idx, document, catalog, &mut diagnostics);
    }

    diagnostics
}

fn validate_rails_line(
    line: &str,
    line_idx: u32,
    document: &TextDocument,
    catalog: &Catalog,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for caps in RAILS_INVOCATION_RE.captures_iter(line) {
        let Some(name) = caps.get(1) else { continue };

        match catalog.by_rails_name(name.as_str()) {
            None => {
                diagnostics.push(Diagnostic::warning(
                    Range::on_line(line_idx, name.start() as u32, name.end() as u32),
                    format!("Unknown Playbook component: \"{}\"", name.as_str()),
                ));
            }
            Some((_, component)) => {
                let Some(block) = delimit_rails_props_block(document, line_idx) else {
                    continue;
                };
                for token in tokenize(&block, SyntaxContext::Rails) {
                    check_token(
                        &block,
                        &token,
                        component,
                        SyntaxContext::Rails,
                        catalog,
                        diagnostics,
                    );
                }
            }
        }
    }
}

fn validate_react_line(
    line: &str,
    line_idx: u32,
    document: &TextDocument,
    catalog: &Catalog,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for caps in REACT_TAG_OPEN_RE.captures_iter(line) {
        let Some(name) = caps.get(1) else { continue };
        let Some((_, component)) = catalog.by_react_name(name.as_str()) else {
            continue;
        };

        let Some(block) = delimit_react_attr_block(document, line_idx, name.end()) else {
            continue;
        };
        for token in tokenize(&block, SyntaxContext::React) {
            check_token(
                &block,
                &token,
                component,
                SyntaxContext::React,
                catalog,
                diagnostics,
            );
        }
    }
}

/// Validate one property token against a component's schema.
///
/// Lookup order: the component's own props, then global props, then the
/// always-valid allow-list. Value checking happens only for quoted
/// literals of enumerated props; bare tokens and braced expressions are
/// host-language values the catalog cannot judge.
fn check_token(
    block: &PropsBlock,
    token: &PropToken,
    component: &ComponentSchema,
    syntax: SyntaxContext,
    catalog: &Catalog,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let lookup_name = match syntax {
        SyntaxContext::Rails => token.name.clone(),
        SyntaxContext::React => camel_to_snake(&token.name),
    };

    let resolved = catalog.resolve_prop(component, &lookup_name);

    if resolved.is_none() {
        if !is_always_valid_prop(&lookup_name) {
            let display_name = match syntax {
                SyntaxContext::Rails => &component.rails_name,
                SyntaxContext::React => &component.react_name,
            };
            diagnostics.push(Diagnostic::warning(
                block.range_of(token.offset, token.name.len()),
                format!(
                    "Unknown prop \"{}\" for component \"{}\"",
                    token.name, display_name
                ),
            ));
        }
        return;
    }

    if token.has_nested_value {
        return;
    }

    let prop = resolved.map(|r| r.prop);
    if let Some(prop) = prop {
        let Some(values) = prop.values_for(Some(syntax)) else {
            return;
        };

        let raw = &token.raw_value;
        if !raw.starts_with('"') && !raw.starts_with('\'') {
            return;
        }

        let clean: String = raw.chars().filter(|c| *c != '"' && *c != '\'').collect();
        let clean = clean.trim();
        if clean.is_empty() || values.iter().any(|v| v == clean) {
            return;
        }

        let legal = values
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join(", ");
        diagnostics.push(Diagnostic::warning(
            block.range_of(token.value_offset, raw.len()),
            format!(
                "Invalid value \"{}\" for prop \"{}\". Valid values: {}",
                clean, token.name, legal
            ),
        ));
    }
}
