use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::components;

/// A renderer turns a section instance's stored data payload into an HTML
/// fragment. Pure function of the payload; collection-backed sections read
/// items the server injected into the payload before rendering.
pub type Renderer = fn(&Value) -> String;

static DISPATCH: Lazy<DispatchTable> = Lazy::new(DispatchTable::with_built_ins);

/// The process-wide dispatch table.
pub fn default_dispatch() -> &'static DispatchTable {
    &DISPATCH
}

/// Name-keyed lookup from a stored component name to its renderer.
pub struct DispatchTable {
    renderers: HashMap<&'static str, Renderer>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn with_built_ins() -> Self {
        let mut table = Self::new();
        table.register("HeroDefault", components::hero_default);
        table.register("HeroCentered", components::hero_centered);
        table.register("HeroSplit", components::hero_split);
        table.register("ServicesGrid", components::services_grid);
        table.register("ServicesList", components::services_list);
        table.register("PortfolioCards", components::portfolio_cards);
        table.register("PortfolioMasonry", components::portfolio_masonry);
        table.register("TestimonialsCarousel", components::testimonials_carousel);
        table.register("TestimonialsStacked", components::testimonials_stacked);
        table.register("AboutDefault", components::about_default);
        table.register("CtaBanner", components::cta_banner);
        table.register("CtaInline", components::cta_inline);
        table.register("ContactDefault", components::contact_default);
        table.register("GalleryGrid", components::gallery_grid);
        table.register("FaqAccordion", components::faq_accordion);
        table.register("RichTextBlock", components::rich_text_block);
        table
    }

    pub fn register(&mut self, component_name: &'static str, renderer: Renderer) {
        self.renderers.insert(component_name, renderer);
    }

    pub fn get(&self, component_name: &str) -> Option<&Renderer> {
        self.renderers.get(component_name)
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::with_built_ins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::registry;

    #[test]
    fn every_catalog_variant_has_a_renderer() {
        let dispatch = DispatchTable::with_built_ins();
        for definition in registry().list() {
            for variant in &definition.variants {
                assert!(
                    dispatch.get(variant.component_name).is_some(),
                    "no renderer for {}",
                    variant.component_name
                );
            }
        }
    }

    #[test]
    fn unknown_component_is_a_miss() {
        let dispatch = DispatchTable::with_built_ins();
        assert!(dispatch.get("Nonexistent").is_none());
    }
}
