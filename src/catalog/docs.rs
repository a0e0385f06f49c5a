// Markdown rendering for hover popups.
//
// Output is plain markdown strings; the host decides how to display them.
// Component docs get a full card with usage examples for both syntaxes,
// prop docs get a compact single block joined with markdown line breaks.

use super::{Catalog, ComponentSchema, PropSchema};
use crate::utils::snake_to_camel;

/// Render the full hover card for a component.
///
/// `name` is the name the user actually wrote at the hover site, so a
/// helper-call hover is titled with the snake_case name and a tag hover
/// with the PascalCase one.
pub fn component_markdown(name: &str, component: &ComponentSchema, catalog: &Catalog) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}", name));
    lines.push(String::new());
    lines.push(component.description.clone());
    lines.push(String::new());

    lines.push("**Rails/ERB:**".to_string());
    lines.push("```erb".to_string());
    if component.has_children {
        lines.push(format!(
            "<%= pb_rails(\"{}\", props: {{}}) do %>",
            component.rails_name
        ));
        lines.push("  Content".to_string());
        lines.push("<% end %>".to_string());
    } else {
        lines.push(format!("<%= pb_rails(\"{}\", props: {{}}) %>", component.rails_name));
    }
    lines.push("```".to_string());
    lines.push(String::new());

    lines.push("**React:**".to_string());
    lines.push("```tsx".to_string());
    if component.has_children {
        lines.push(format!("<{}>", name));
        lines.push("  Content".to_string());
        lines.push(format!("</{}>", name));
    } else {
        lines.push(format!("<{} />", name));
    }
    lines.push("```".to_string());
    lines.push(String::new());

    if !component.props.is_empty() {
        lines.push("## Props".to_string());
        lines.push(String::new());

        for (prop_name, prop) in &component.props {
            lines.push(format!(
                "**{}** ({} in React)",
                prop_name,
                snake_to_camel(prop_name)
            ));
            lines.push(format!("- Type: `{}`", prop.kind.type_name()));

            if let Some(values) = prop.values_for(None) {
                lines.push(format!("- Values: {}", backticked(values)));
            }
            if let Some(default) = &prop.default_value {
                lines.push(format!("- Default: `{}`", default));
            }
            if prop.required {
                lines.push("- **Required**".to_string());
            }
            lines.push(String::new());
        }
    }

    if !catalog.global_props().is_empty() {
        lines.push("## Global Props".to_string());
        lines.push(String::new());
        lines.push("*These props are available on all Playbook components:*".to_string());
        lines.push(String::new());

        let mut globals: Vec<String> = Vec::new();
        for (prop_name, prop) in catalog.global_props() {
            let mut desc = format!("**{}** ({})", prop_name, snake_to_camel(prop_name));
            match prop.values_for(None) {
                Some(values) if values.len() > 5 => {
                    desc.push_str(&format!(
                        " - `{}`: {}...",
                        prop.kind.type_name(),
                        backticked(&values[..5])
                    ));
                }
                Some(values) => {
                    desc.push_str(&format!(" - {}", backticked(values)));
                }
                None => {
                    desc.push_str(&format!(" - `{}`", prop.kind.type_name()));
                }
            }
            globals.push(desc);
        }
        lines.push(globals.join("  \n"));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render the compact hover block for a single prop.
pub fn prop_markdown(name: &str, prop: &PropSchema, is_global: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    if is_global {
        lines.push(format!("**{}** *(global prop)*", name));
    } else {
        lines.push(format!("**{}**", name));
    }
    lines.push(format!("Type: `{}`", prop.kind.type_name()));

    if let Some(values) = prop.values_for(None) {
        lines.push(format!("Values: {}", backticked(values)));
    }
    if let Some(default) = &prop.default_value {
        lines.push(format!("Default: `{}`", default));
    }
    if prop.required {
        lines.push("**Required**".to_string());
    }

    lines.join("  \n")
}

fn backticked(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("`{}`", v))
        .collect::<Vec<_>>()
        .join(", ")
}
