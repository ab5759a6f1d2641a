//! Server-side rendering: the component dispatch table and the page
//! renderer that walks a page's visible sections in order.

mod components;
mod dispatch;

pub use dispatch::{default_dispatch, DispatchTable, Renderer};

use crate::domain::{Menu, Page, SiteSettings};

/// Render the body of a page: visible sections, ascending order, each
/// resolved through the dispatch table. An unknown component name renders
/// an inline placeholder instead of failing the whole page.
pub fn render_sections(page: &Page, dispatch: &DispatchTable) -> String {
    let mut html = String::new();
    for section in page.visible_sections() {
        match dispatch.get(&section.component_name) {
            Some(renderer) => html.push_str(&renderer(&section.data)),
            None => {
                crate::metrics::record_missing_component();
                tracing::warn!(
                    component = %section.component_name,
                    section_id = %section.id,
                    "No renderer registered for component"
                );
                html.push_str(&components::missing_component(&section.component_name));
            }
        }
    }
    html
}

/// Render a complete public page: site layout (settings + navigation)
/// around the section body.
pub fn render_page(
    page: &Page,
    settings: &SiteSettings,
    menu: Option<&Menu>,
    dispatch: &DispatchTable,
) -> String {
    let title = page
        .seo
        .meta_title
        .clone()
        .unwrap_or_else(|| format!("{} — {}", page.title, settings.site_name));
    let description = page
        .seo
        .meta_description
        .clone()
        .or_else(|| settings.default_seo.meta_description.clone())
        .unwrap_or_default();

    let nav = menu.map(components::render_nav).unwrap_or_default();
    let body = render_sections(page, dispatch);

    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <style>body{{font-family:{body_font};font-size:{base}px}}h1,h2,h3{{font-family:{heading_font}}}</style>\n\
         </head>\n<body>\n<header>{nav}</header>\n{body}\n\
         <footer><p>{site_name}</p></footer>\n</body>\n</html>",
        title = components::escape(&title),
        description = components::escape(&description),
        body_font = components::escape(&settings.typography.body_font),
        heading_font = components::escape(&settings.typography.heading_font),
        base = settings.typography.base_size_px,
        nav = nav,
        body = body,
        site_name = components::escape(&settings.site_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageType, SectionInstance};
    use serde_json::json;
    use uuid::Uuid;

    fn page_with(sections: Vec<SectionInstance>) -> Page {
        let mut page = Page::new("Home", "home", PageType::Home);
        page.sections = sections;
        page
    }

    fn instance(component: &str, order: i32, visible: bool) -> SectionInstance {
        SectionInstance {
            id: Uuid::new_v4(),
            section_type: "hero".to_string(),
            component_name: component.to_string(),
            order,
            data: json!({"headline": "Hi", "subline": "", "cta_label": "", "cta_url": "", "background_image": ""}),
            is_visible: visible,
        }
    }

    #[test]
    fn hidden_sections_are_not_rendered() {
        let dispatch = default_dispatch();
        let page = page_with(vec![
            instance("HeroDefault", 0, false),
            instance("HeroCentered", 1, true),
        ]);

        let html = render_sections(&page, dispatch);
        assert!(html.contains("section-hero--centered"));
        assert!(!html.contains("section-hero--default"));
    }

    #[test]
    fn sections_render_in_ascending_order() {
        let dispatch = default_dispatch();
        let page = page_with(vec![
            instance("HeroCentered", 7, true),
            instance("HeroDefault", 2, true),
        ]);

        let html = render_sections(&page, dispatch);
        let default_at = html.find("section-hero--default").unwrap();
        let centered_at = html.find("section-hero--centered").unwrap();
        assert!(default_at < centered_at);
    }

    #[test]
    fn unknown_component_renders_placeholder() {
        let dispatch = default_dispatch();
        let page = page_with(vec![instance("NoSuchComponent", 0, true)]);

        let html = render_sections(&page, dispatch);
        assert!(html.contains("cms-missing"));
        assert!(html.contains("NoSuchComponent"));
    }
}
