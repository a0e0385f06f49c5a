// Catalog data model.
//
// The JSON artifacts are produced offline by the metadata sync step; this
// module owns their wire shape and the processed in-memory schema the rest
// of the engine consumes. Wire structs stay close to the JSON; processed
// structs classify each prop once at load time so lookups stay branch-free.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::language::SyntaxContext;

/// A single prop as it appears in the JSON artifacts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPropSchema {
    #[serde(rename = "type")]
    pub type_name: String,
    pub values: Option<Vec<String>>,
    pub rails_values: Option<Vec<String>>,
    pub react_values: Option<Vec<String>>,
    pub default: Option<String>,
    pub required: Option<bool>,
}

/// A component entry as it appears in `playbook.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponentSchema {
    pub rails: String,
    pub react: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub props: BTreeMap<String, RawPropSchema>,
}

/// Top-level shape of `playbook.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalog {
    #[serde(default)]
    pub global_props: BTreeMap<String, RawPropSchema>,
    #[serde(default)]
    pub components: BTreeMap<String, RawComponentSchema>,
}

/// A form builder field as it appears in `form-builders.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFormBuilderField {
    pub name: String,
    pub kit: String,
    #[serde(default)]
    pub props: BTreeMap<String, RawPropSchema>,
}

/// Top-level shape of `form-builders.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormBuilderCatalog {
    #[serde(default)]
    pub fields: Vec<RawFormBuilderField>,
}

/// Legal values for an enumerated prop, optionally split per surface syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValues {
    /// Union of every legal value; the fallback when no context applies.
    pub values: Vec<String>,
    pub rails_values: Option<Vec<String>>,
    pub react_values: Option<Vec<String>>,
}

impl EnumValues {
    /// The value list legal in the given context, or the union fallback.
    pub fn for_context(&self, context: Option<SyntaxContext>) -> &[String] {
        match context {
            Some(SyntaxContext::Rails) => self.rails_values.as_deref().unwrap_or(&self.values),
            Some(SyntaxContext::React) => self.react_values.as_deref().unwrap_or(&self.values),
            None => &self.values,
        }
    }
}

/// What a prop accepts, classified once at catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKind {
    /// A closed set of legal string values.
    Enumerated {
        type_name: String,
        values: EnumValues,
    },
    /// A true/false toggle.
    Boolean,
    /// Anything else; the declared type name is kept for documentation.
    Freeform { type_name: String },
}

impl PropKind {
    pub fn type_name(&self) -> &str {
        match self {
            PropKind::Enumerated { type_name, .. } => type_name,
            PropKind::Boolean => "boolean",
            PropKind::Freeform { type_name } => type_name,
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, PropKind::Boolean)
    }

    pub fn enum_values(&self) -> Option<&EnumValues> {
        match self {
            PropKind::Enumerated { values, .. } => Some(values),
            _ => None,
        }
    }
}

/// A fully processed prop schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropSchema {
    pub kind: PropKind,
    pub default_value: Option<String>,
    pub required: bool,
}

impl PropSchema {
    /// Legal values in the given context, if this prop is enumerated.
    ///
    /// Returns `None` for boolean and freeform props and for an enumerated
    /// prop whose context list is empty, so callers can treat `Some` as
    /// "membership must be checked".
    pub fn values_for(&self, context: Option<SyntaxContext>) -> Option<&[String]> {
        let values = self.kind.enum_values()?.for_context(context);
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// The default with any quote characters stripped, for comparison
    /// against scanned values.
    pub fn default_literal(&self) -> Option<String> {
        self.default_value
            .as_ref()
            .map(|raw| raw.chars().filter(|c| *c != '"' && *c != '\'').collect())
    }
}

impl From<RawPropSchema> for PropSchema {
    fn from(raw: RawPropSchema) -> Self {
        let type_name = if raw.type_name.is_empty() {
            "any".to_string()
        } else {
            raw.type_name
        };

        let rails_values = non_empty(raw.rails_values);
        let react_values = non_empty(raw.react_values);
        let values = non_empty(raw.values);

        let kind = if values.is_some() || rails_values.is_some() || react_values.is_some() {
            // A missing union list is rebuilt from the per-context lists so
            // for_context always has a fallback.
            let values = values.unwrap_or_else(|| {
                let mut union: Vec<String> = rails_values.clone().unwrap_or_default();
                for value in react_values.iter().flatten() {
                    if !union.contains(value) {
                        union.push(value.clone());
                    }
                }
                union
            });
            PropKind::Enumerated {
                type_name,
                values: EnumValues {
                    values,
                    rails_values,
                    react_values,
                },
            }
        } else if type_name == "boolean" {
            PropKind::Boolean
        } else {
            PropKind::Freeform { type_name }
        };

        PropSchema {
            kind,
            default_value: raw.default,
            required: raw.required.unwrap_or(false),
        }
    }
}

fn non_empty(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.filter(|v| !v.is_empty())
}

/// A fully processed component schema.
#[derive(Debug, Clone)]
pub struct ComponentSchema {
    /// Helper name used from Rails templates, e.g. `button` or `flex/flex_item`.
    pub rails_name: String,
    /// Tag name used from React files, e.g. `Button` or `FlexItem`.
    pub react_name: String,
    pub description: String,
    pub has_children: bool,
    /// Props keyed by snake_case name.
    pub props: BTreeMap<String, PropSchema>,
}

impl From<RawComponentSchema> for ComponentSchema {
    fn from(raw: RawComponentSchema) -> Self {
        ComponentSchema {
            rails_name: raw.rails,
            react_name: raw.react,
            description: raw.description,
            has_children: raw.has_children,
            props: raw
                .props
                .into_iter()
                .map(|(name, prop)| (name, prop.into()))
                .collect(),
        }
    }
}

/// A form builder field schema, e.g. `p.pb_text_field`.
#[derive(Debug, Clone)]
pub struct FormBuilderField {
    /// Builder method name without the receiver, e.g. `pb_text_field`.
    pub name: String,
    /// The kit the field renders through.
    pub kit: String,
    pub props: BTreeMap<String, PropSchema>,
}

impl From<RawFormBuilderField> for FormBuilderField {
    fn from(raw: RawFormBuilderField) -> Self {
        FormBuilderField {
            name: raw.name,
            kit: raw.kit,
            props: raw
                .props
                .into_iter()
                .map(|(name, prop)| (name, prop.into()))
                .collect(),
        }
    }
}
