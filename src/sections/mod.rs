//! Section definitions: the static catalog the page-builder editor reads
//! to generate forms, and the registry that instantiates sections with
//! their default content.

mod catalog;
mod registry;

pub use registry::{registry, SectionRegistry};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    RichText,
    Image,
    Url,
    Number,
    Boolean,
    Select,
    /// Repeating group of string values (e.g. bullet points, tags).
    List,
}

/// One editable field in a section's generated form. Order in the schema
/// vector is the order the editor lays the form out in.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub label: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

impl FieldSpec {
    pub fn new(name: &'static str, field_type: FieldType, label: &'static str) -> Self {
        FieldSpec {
            name,
            field_type,
            label,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: Vec<&'static str>) -> Self {
        self.options = options;
        self
    }
}

/// A visual variant of a section. The variant's component name is what gets
/// stamped onto stored section instances and looked up in the dispatch
/// table at render time.
#[derive(Debug, Clone, Serialize)]
pub struct SectionVariant {
    pub name: &'static str,
    pub component_name: &'static str,
}

/// Static descriptor of a page-building-block: editable fields, default
/// content, and the variants it can render as. Not persisted; pages store
/// only the section type id, chosen component name, and data payload.
#[derive(Debug, Clone, Serialize)]
pub struct SectionDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Vec<FieldSpec>,
    pub default_data: Value,
    pub variants: Vec<SectionVariant>,
}

impl SectionDefinition {
    /// The variant used when the editor does not pick one explicitly.
    pub fn default_variant(&self) -> &SectionVariant {
        &self.variants[0]
    }

    pub fn variant(&self, name: &str) -> Option<&SectionVariant> {
        self.variants.iter().find(|v| v.name == name)
    }
}
