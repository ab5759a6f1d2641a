use std::collections::HashMap;

use once_cell::sync::Lazy;
use uuid::Uuid;

use super::{catalog, SectionDefinition};
use crate::domain::SectionInstance;
use crate::error::{CmsError, Result};

static REGISTRY: Lazy<SectionRegistry> = Lazy::new(SectionRegistry::new);

/// The process-wide section catalog.
pub fn registry() -> &'static SectionRegistry {
    &REGISTRY
}

/// Registry of section definitions keyed by section type id.
pub struct SectionRegistry {
    definitions: HashMap<&'static str, SectionDefinition>,
    // Catalog order, preserved for the editor's "add section" listing
    order: Vec<&'static str>,
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionRegistry {
    pub fn new() -> Self {
        let mut definitions = HashMap::new();
        let mut order = Vec::new();
        for definition in catalog::built_in_definitions() {
            order.push(definition.id);
            definitions.insert(definition.id, definition);
        }
        Self { definitions, order }
    }

    pub fn get(&self, section_type: &str) -> Option<&SectionDefinition> {
        self.definitions.get(section_type)
    }

    /// All definitions in stable catalog order.
    pub fn list(&self) -> Vec<&SectionDefinition> {
        self.order
            .iter()
            .filter_map(|id| self.definitions.get(id))
            .collect()
    }

    pub fn list_types(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    /// Build a fresh section instance from a definition's defaults. The
    /// chosen variant's component name is stamped onto the instance; that
    /// string is what the dispatch table resolves at render time.
    pub fn instantiate(
        &self,
        section_type: &str,
        variant: Option<&str>,
        order: i32,
    ) -> Result<SectionInstance> {
        let definition = self
            .get(section_type)
            .ok_or_else(|| CmsError::UnknownSectionType(section_type.to_string()))?;

        let variant = match variant {
            Some(name) => {
                definition
                    .variant(name)
                    .ok_or_else(|| CmsError::UnknownVariant {
                        section_type: section_type.to_string(),
                        variant: name.to_string(),
                    })?
            }
            None => definition.default_variant(),
        };

        Ok(SectionInstance {
            id: Uuid::new_v4(),
            section_type: definition.id.to_string(),
            component_name: variant.component_name.to_string(),
            order,
            data: definition.default_data.clone(),
            is_visible: true,
        })
    }

    /// Re-stamp an existing instance's component name after a variant
    /// change in the editor.
    pub fn component_for(&self, section_type: &str, variant: &str) -> Result<&'static str> {
        let definition = self
            .get(section_type)
            .ok_or_else(|| CmsError::UnknownSectionType(section_type.to_string()))?;
        definition
            .variant(variant)
            .map(|v| v.component_name)
            .ok_or_else(|| CmsError::UnknownVariant {
                section_type: section_type.to_string(),
                variant: variant.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;

    #[test]
    fn registry_has_built_in_sections() {
        let registry = SectionRegistry::new();

        let types = registry.list_types();
        assert!(types.contains(&constants::SECTION_HERO));
        assert!(types.contains(&constants::SECTION_TESTIMONIALS));
        assert!(types.contains(&constants::SECTION_FAQ));
    }

    #[test]
    fn list_preserves_catalog_order() {
        let registry = SectionRegistry::new();
        let listed: Vec<&str> = registry.list().iter().map(|d| d.id).collect();
        assert_eq!(listed, registry.list_types());
    }

    #[test]
    fn instantiate_seeds_defaults_and_component_name() {
        let registry = SectionRegistry::new();

        let section = registry
            .instantiate(constants::SECTION_HERO, None, 0)
            .unwrap();
        assert_eq!(section.section_type, "hero");
        assert_eq!(section.component_name, "HeroDefault");
        assert!(section.is_visible);
        assert_eq!(section.data["headline"], "Welcome to our studio");

        let centered = registry
            .instantiate(constants::SECTION_HERO, Some("centered"), 1)
            .unwrap();
        assert_eq!(centered.component_name, "HeroCentered");
        assert_eq!(centered.order, 1);
    }

    #[test]
    fn instantiate_rejects_unknown_type_and_variant() {
        let registry = SectionRegistry::new();

        assert!(matches!(
            registry.instantiate("marquee", None, 0),
            Err(CmsError::UnknownSectionType(_))
        ));
        assert!(matches!(
            registry.instantiate(constants::SECTION_HERO, Some("sideways"), 0),
            Err(CmsError::UnknownVariant { .. })
        ));
    }
}
