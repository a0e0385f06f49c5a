//! Completion items for a cursor position.
//!
//! The six completion contexts each get their own candidate list. Insert
//! texts are snippet strings: enumerated props expand to a choice
//! placeholder over their legal values, booleans to a true/false choice,
//! everything else to a plain tab stop. Sort keys keep component props
//! ahead of global props and a prop's default value ahead of its siblings.

use serde::Serialize;

use crate::catalog::{Catalog, ComponentSchema, PropSchema, ResolvedProp};
use crate::document::{Position, TextDocument};
use crate::language::SyntaxContext;
use crate::scan::context::{RAILS_VALUE_AT_CURSOR_RE, REACT_VALUE_AT_CURSOR_RE};
use crate::scan::{completion_context, resolve_enclosing_component, CompletionContext};
use crate::utils::{camel_to_snake, snake_to_camel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionItemKind {
    /// A component name.
    Class,
    /// A prop name.
    Field,
    /// A prop value.
    Value,
}

/// One completion candidate, host-neutral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Snippet text; placeholders use `$1`/`${1|a,b|}` syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
}

/// Candidates for the completion context at `position`, or empty when the
/// cursor is not somewhere completable.
pub fn completions_for_position(
    document: &TextDocument,
    position: Position,
    catalog: &Catalog,
) -> Vec<CompletionItem> {
    let Some(context) = completion_context(document, position) else {
        return Vec::new();
    };

    match context {
        CompletionContext::RailsComponentName => component_items(catalog, SyntaxContext::Rails),
        CompletionContext::ReactComponentName => component_items(catalog, SyntaxContext::React),
        CompletionContext::RailsPropName => prop_name_items(document, position, catalog),
        CompletionContext::ReactPropName => prop_name_items(document, position, catalog),
        CompletionContext::RailsPropValue | CompletionContext::ReactPropValue => {
            prop_value_items(document, position, catalog)
        }
    }
}

fn component_items(catalog: &Catalog, syntax: SyntaxContext) -> Vec<CompletionItem> {
    catalog
        .components()
        .map(|(key, component)| {
            let label = match syntax {
                SyntaxContext::Rails => component.rails_name.clone(),
                SyntaxContext::React => component.react_name.clone(),
            };
            CompletionItem {
                label: label.clone(),
                kind: CompletionItemKind::Class,
                detail: Some(format!("Playbook {}", key)),
                documentation: Some(component.description.clone()),
                insert_text: Some(label.clone()),
                sort_text: Some(label),
            }
        })
        .collect()
}

fn prop_name_items(
    document: &TextDocument,
    position: Position,
    catalog: &Catalog,
) -> Vec<CompletionItem> {
    let Some((component, syntax)) = enclosing_schema(document, position, catalog) else {
        return Vec::new();
    };

    let mut items: Vec<CompletionItem> = Vec::new();
    for (name, prop) in &component.props {
        items.push(prop_name_item(name, prop, syntax, false));
    }
    for (name, prop) in catalog.global_props() {
        // Component props shadow globals in lookups; mirror that here.
        if !component.props.contains_key(name) {
            items.push(prop_name_item(name, prop, syntax, true));
        }
    }
    items
}

fn prop_name_item(
    name: &str,
    prop: &PropSchema,
    syntax: SyntaxContext,
    is_global: bool,
) -> CompletionItem {
    let label = match syntax {
        SyntaxContext::Rails => name.to_string(),
        SyntaxContext::React => snake_to_camel(name),
    };

    let detail = if is_global {
        format!("{} (global)", prop.kind.type_name())
    } else if prop.required {
        format!("{} (required)", prop.kind.type_name())
    } else {
        prop.kind.type_name().to_string()
    };

    // Globals sort after the component's own props.
    let sort_text = if is_global {
        format!("z{}", label)
    } else {
        label.clone()
    };

    CompletionItem {
        label: label.clone(),
        kind: CompletionItemKind::Field,
        detail: Some(detail),
        documentation: Some(crate::catalog::docs::prop_markdown(name, prop, is_global)),
        insert_text: Some(prop_snippet(&label, prop, syntax)),
        sort_text: Some(sort_text),
    }
}

/// The snippet inserted when a prop name is accepted. Rails values are
/// quoted strings; JSX enum choices go inside braces with each choice
/// individually quoted.
fn prop_snippet(label: &str, prop: &PropSchema, syntax: SyntaxContext) -> String {
    let values = prop.values_for(Some(syntax));
    match syntax {
        SyntaxContext::Rails => match values {
            Some(values) => format!("{}: \"${{1|{}|}}\"", label, values.join(",")),
            None if prop.kind.is_boolean() => format!("{}: ${{1|true,false|}}", label),
            None => format!("{}: \"$1\"", label),
        },
        SyntaxContext::React => match values {
            Some(values) => {
                let choices: Vec<String> =
                    values.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("{}={{${{1|{}|}}}}", label, choices.join(","))
            }
            None if prop.kind.is_boolean() => format!("{}={{${{1|true,false|}}}}", label),
            None => format!("{}=\"$1\"", label),
        },
    }
}

fn prop_value_items(
    document: &TextDocument,
    position: Position,
    catalog: &Catalog,
) -> Vec<CompletionItem> {
    let Some((component, syntax)) = enclosing_schema(document, position, catalog) else {
        return Vec::new();
    };
    let Some(target) = value_target(document, position, syntax) else {
        return Vec::new();
    };

    let lookup_name = match syntax {
        SyntaxContext::Rails => target.name.clone(),
        SyntaxContext::React => camel_to_snake(&target.name),
    };
    let Some(ResolvedProp { prop, .. }) = catalog.resolve_prop(component, &lookup_name) else {
        return Vec::new();
    };

    let default = prop.default_literal();
    let candidates: Vec<String> = match prop.values_for(Some(syntax)) {
        Some(values) => values.to_vec(),
        None if prop.kind.is_boolean() => vec!["true".to_string(), "false".to_string()],
        None => return Vec::new(),
    };

    // Booleans are host-language literals and stay bare everywhere.
    let quote = !target.inside_delimiter && !prop.kind.is_boolean();

    candidates
        .into_iter()
        .map(|value| {
            let is_default = default.as_deref() == Some(value.as_str());
            CompletionItem {
                label: value.clone(),
                kind: CompletionItemKind::Value,
                detail: is_default.then(|| "default".to_string()),
                documentation: None,
                insert_text: Some(if quote {
                    format!("\"{}\"", value)
                } else {
                    value.clone()
                }),
                // Defaults sort first.
                sort_text: Some(if is_default {
                    format!("0{}", value)
                } else {
                    format!("1{}", value)
                }),
            }
        })
        .collect()
}

/// The prop whose value is being typed at the cursor.
struct ValueTarget {
    name: String,
    /// Whether the cursor already sits inside an opening quote or brace,
    /// in which case inserted values must not add their own quoting.
    inside_delimiter: bool,
}

fn value_target(
    document: &TextDocument,
    position: Position,
    syntax: SyntaxContext,
) -> Option<ValueTarget> {
    let prefix = document.line_prefix(position)?;
    let (re, separator) = match syntax {
        SyntaxContext::Rails => (&*RAILS_VALUE_AT_CURSOR_RE, ':'),
        SyntaxContext::React => (&*REACT_VALUE_AT_CURSOR_RE, '='),
    };
    let caps = re.captures(prefix)?;
    let name = caps.get(1)?;

    let after_name = &prefix[name.end()..];
    let after_separator = after_name.split_once(separator).map(|(_, rest)| rest)?;
    let inside_delimiter = after_separator
        .trim_start()
        .starts_with(['"', '\'', '{']);

    Some(ValueTarget {
        name: name.as_str().to_string(),
        inside_delimiter,
    })
}

fn enclosing_schema<'c>(
    document: &TextDocument,
    position: Position,
    catalog: &'c Catalog,
) -> Option<(&'c ComponentSchema, SyntaxContext)> {
    let occurrence = resolve_enclosing_component(document, position)?;
    let found = match occurrence.syntax {
        SyntaxContext::Rails => catalog.by_rails_name(&occurrence.component_name),
        SyntaxContext::React => catalog.by_react_name(&occurrence.component_name),
    };
    found.map(|(_, component)| (component, occurrence.syntax))
}
