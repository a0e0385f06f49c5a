// Component catalog: loading, indexing, and lookup.
//
// The engine never talks to the design system at runtime. An offline sync
// step writes two JSON artifacts into the extension's data directory and
// this module loads them once per process. A missing or malformed artifact
// degrades to an empty catalog so the editor keeps working without
// component intelligence rather than failing requests.

pub mod docs;
pub mod types;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

pub use types::{
    ComponentSchema, EnumValues, FormBuilderField, PropKind, PropSchema, RawCatalog,
    RawComponentSchema, RawFormBuilderCatalog, RawPropSchema,
};

/// Props accepted on every component without a schema entry. Their values
/// are never checked.
pub const ALWAYS_VALID_PROPS: [&str; 6] =
    ["id", "data", "aria", "html_options", "children", "style"];

/// Whether a snake_case prop name is on the always-valid list.
pub fn is_always_valid_prop(name: &str) -> bool {
    ALWAYS_VALID_PROPS.contains(&name)
}

/// Location of the JSON artifacts the offline sync step produces.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub data_dir: PathBuf,
}

impl CatalogPaths {
    /// Artifacts live under `data/` inside the extension install root.
    pub fn new(extension_root: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: extension_root.into().join("data"),
        }
    }

    pub fn components_file(&self) -> PathBuf {
        self.data_dir.join("playbook.json")
    }

    pub fn form_builders_file(&self) -> PathBuf {
        self.data_dir.join("form-builders.json")
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The processed component catalog.
///
/// The artifact keys top-level components by React tag name and
/// subcomponents by their slash-qualified rails path, so a short name
/// shared by a top-level and a nested kit never collides. Secondary
/// indexes map each surface name back to its catalog key so both lookup
/// directions stay O(1).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: BTreeMap<String, ComponentSchema>,
    global_props: BTreeMap<String, PropSchema>,
    rails_index: HashMap<String, String>,
    react_index: HashMap<String, String>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn from_raw(raw: RawCatalog) -> Self {
        let components: BTreeMap<String, ComponentSchema> = raw
            .components
            .into_iter()
            .map(|(key, component)| (key, component.into()))
            .collect();

        // First key in catalog order wins when two entries share a name.
        let mut rails_index = HashMap::new();
        let mut react_index = HashMap::new();
        for (key, component) in &components {
            rails_index
                .entry(component.rails_name.clone())
                .or_insert_with(|| key.clone());
            react_index
                .entry(component.react_name.clone())
                .or_insert_with(|| key.clone());
        }

        Catalog {
            components,
            rails_index,
            global_props: raw
                .global_props
                .into_iter()
                .map(|(name, prop)| (name, prop.into()))
                .collect(),
            react_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// All components in catalog key order.
    pub fn components(&self) -> impl Iterator<Item = (&str, &ComponentSchema)> {
        self.components
            .iter()
            .map(|(key, component)| (key.as_str(), component))
    }

    pub fn get(&self, key: &str) -> Option<&ComponentSchema> {
        self.components.get(key)
    }

    /// Look up a component by the name used in `pb_rails("name", ...)`.
    ///
    /// Top-level components are keyed by React name, so this goes through
    /// the rails-name index rather than the key map.
    pub fn by_rails_name(&self, name: &str) -> Option<(&str, &ComponentSchema)> {
        let key = self.rails_index.get(name)?;
        self.components
            .get_key_value(key)
            .map(|(key, component)| (key.as_str(), component))
    }

    /// Look up a component by its React tag name.
    pub fn by_react_name(&self, name: &str) -> Option<(&str, &ComponentSchema)> {
        let key = self.react_index.get(name)?;
        self.components
            .get_key_value(key)
            .map(|(key, component)| (key.as_str(), component))
    }

    pub fn global_props(&self) -> &BTreeMap<String, PropSchema> {
        &self.global_props
    }

    pub fn global_prop(&self, name: &str) -> Option<&PropSchema> {
        self.global_props.get(name)
    }

    /// Resolve a snake_case prop name against a component: the component's
    /// own props first, then the global props shared by every kit.
    pub fn resolve_prop<'a>(
        &'a self,
        component: &'a ComponentSchema,
        name: &str,
    ) -> Option<ResolvedProp<'a>> {
        if let Some(prop) = component.props.get(name) {
            return Some(ResolvedProp {
                prop,
                is_global: false,
            });
        }
        self.global_props.get(name).map(|prop| ResolvedProp {
            prop,
            is_global: true,
        })
    }
}

/// A prop found on a component, with where it came from.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProp<'a> {
    pub prop: &'a PropSchema,
    pub is_global: bool,
}

/// The processed form builder catalog.
#[derive(Debug, Clone, Default)]
pub struct FormBuilderCatalog {
    fields: Vec<FormBuilderField>,
}

impl FormBuilderCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawFormBuilderCatalog = serde_json::from_str(json)?;
        Ok(FormBuilderCatalog {
            fields: raw.fields.into_iter().map(|field| field.into()).collect(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn fields(&self) -> &[FormBuilderField] {
        &self.fields
    }

    /// Look up a builder field by method name, e.g. `pb_text_field`.
    pub fn find_field(&self, name: &str) -> Option<&FormBuilderField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();
static FORM_BUILDERS: OnceLock<FormBuilderCatalog> = OnceLock::new();

/// Load the component catalog once per process. Every later call returns
/// the same instance, including concurrent first calls.
pub fn load_catalog(paths: &CatalogPaths) -> &'static Catalog {
    CATALOG.get_or_init(|| read_catalog(&paths.components_file()))
}

/// Load the form builder catalog once per process.
pub fn load_form_builders(paths: &CatalogPaths) -> &'static FormBuilderCatalog {
    FORM_BUILDERS.get_or_init(|| read_form_builders(&paths.form_builders_file()))
}

fn read_catalog(path: &Path) -> Catalog {
    match Catalog::from_file(path) {
        Ok(catalog) => {
            debug!(
                components = catalog.component_count(),
                globals = catalog.global_props.len(),
                path = %path.display(),
                "loaded component catalog"
            );
            catalog
        }
        Err(err) => {
            warn!(%err, path = %path.display(), "component catalog unavailable, validation disabled");
            Catalog::default()
        }
    }
}

fn read_form_builders(path: &Path) -> FormBuilderCatalog {
    match FormBuilderCatalog::from_file(path) {
        Ok(catalog) => {
            debug!(fields = catalog.fields.len(), "loaded form builder catalog");
            catalog
        }
        Err(err) => {
            warn!(%err, path = %path.display(), "form builder catalog unavailable");
            FormBuilderCatalog::default()
        }
    }
}
