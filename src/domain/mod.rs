use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{CmsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    About,
    Services,
    Portfolio,
    Contact,
    Blog,
    Custom,
}

/// A configured occurrence of a section within a page. The shape of `data`
/// is defined externally by the matching section definition; the store
/// treats it as an opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionInstance {
    pub id: Uuid,
    pub section_type: String,
    pub component_name: String,
    pub order: i32,
    pub data: Value,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub status: PageStatus,
    pub page_type: PageType,
    pub sections: Vec<SectionInstance>,
    pub seo: SeoMetadata,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, page_type: PageType) -> Self {
        let now = Utc::now();
        Page {
            id: None,
            title: title.into(),
            slug: slug.into(),
            status: PageStatus::Draft,
            page_type,
            sections: Vec::new(),
            seo: SeoMetadata::default(),
            author_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sections eligible for public rendering: visible only, ascending order.
    pub fn visible_sections(&self) -> Vec<&SectionInstance> {
        let mut sections: Vec<&SectionInstance> =
            self.sections.iter().filter(|s| s.is_visible).collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// The order value for a section appended at the end.
    pub fn next_order(&self) -> i32 {
        self.sections.iter().map(|s| s.order + 1).max().unwrap_or(0)
    }

    pub fn section_mut(&mut self, section_id: Uuid) -> Option<&mut SectionInstance> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Rewrite all section orders to match the given id sequence, producing
    /// a contiguous 0..n-1 ordering. The id set must match the stored
    /// sections exactly so a stale editor cannot drop sections silently.
    pub fn reorder_sections(&mut self, ordered_ids: &[Uuid]) -> Result<()> {
        if ordered_ids.len() != self.sections.len() {
            return Err(CmsError::Validation(format!(
                "Reorder lists {} sections but page has {}",
                ordered_ids.len(),
                self.sections.len()
            )));
        }
        for id in ordered_ids {
            if !self.sections.iter().any(|s| s.id == *id) {
                return Err(CmsError::Validation(format!(
                    "Reorder references unknown section {}",
                    id
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for id in ordered_ids {
            if !seen.insert(*id) {
                return Err(CmsError::Validation(format!(
                    "Reorder lists section {} twice",
                    id
                )));
            }
        }

        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(section) = self.section_mut(*id) {
                section.order = position as i32;
            }
        }
        self.sections.sort_by_key(|s| s.order);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a section and close the gap its order leaves behind.
    pub fn remove_section(&mut self, section_id: Uuid) -> Result<()> {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != section_id);
        if self.sections.len() == before {
            return Err(CmsError::not_found("section", section_id.to_string()));
        }
        self.sections.sort_by_key(|s| s.order);
        for (position, section) in self.sections.iter_mut().enumerate() {
            section.order = position as i32;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub client: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub tags: Vec<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Option<Uuid>,
    pub author_name: String,
    pub author_role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
    pub avatar_url: Option<String>,
    pub rating: Option<u8>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    pub status: PageStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub label: String,
    pub url: String,
    /// `None` for top-level items; submenu items point at their parent.
    pub parent_id: Option<Uuid>,
    pub open_in_new_tab: bool,
    pub display_order: i32,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub items: Vec<MenuItem>,
    pub created_at: DateTime<Utc>,
}

impl Menu {
    /// Visible items in display order, top level only.
    pub fn visible_top_level(&self) -> Vec<&MenuItem> {
        let mut items: Vec<&MenuItem> = self
            .items
            .iter()
            .filter(|i| i.is_visible && i.parent_id.is_none())
            .collect();
        items.sort_by_key(|i| i.display_order);
        items
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    pub base_size_px: u8,
}

impl Default for Typography {
    fn default() -> Self {
        Typography {
            heading_font: "Georgia, serif".to_string(),
            body_font: "Helvetica, Arial, sans-serif".to_string(),
            base_size_px: 16,
        }
    }
}

/// Singleton settings document; one record per site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub social_links: std::collections::BTreeMap<String, String>,
    pub typography: Typography,
    pub default_seo: SeoMetadata,
    pub updated_at: DateTime<Utc>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            site_name: "My Site".to_string(),
            tagline: None,
            logo_url: None,
            favicon_url: None,
            contact_email: None,
            phone: None,
            address: None,
            social_links: Default::default(),
            typography: Typography::default(),
            default_seo: SeoMetadata::default(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<Uuid>,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: Option<Uuid>,
    pub file_name: String,
    pub url: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Lowercase, hyphen-separated slug from a free-form title.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(order: i32, visible: bool) -> SectionInstance {
        SectionInstance {
            id: Uuid::new_v4(),
            section_type: "hero".to_string(),
            component_name: "HeroDefault".to_string(),
            order,
            data: json!({}),
            is_visible: visible,
        }
    }

    #[test]
    fn visible_sections_filters_and_sorts() {
        let mut page = Page::new("Home", "home", PageType::Home);
        page.sections.push(section(2, true));
        page.sections.push(section(0, true));
        page.sections.push(section(1, false));

        let visible = page.visible_sections();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].order, 0);
        assert_eq!(visible[1].order, 2);
    }

    #[test]
    fn reorder_produces_contiguous_sequence() {
        let mut page = Page::new("Home", "home", PageType::Home);
        page.sections.push(section(0, true));
        page.sections.push(section(5, true));
        page.sections.push(section(9, true));

        let mut ids: Vec<Uuid> = page.sections.iter().map(|s| s.id).collect();
        ids.reverse();
        page.reorder_sections(&ids).unwrap();

        let orders: Vec<i32> = page.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(page.sections[0].id, ids[0]);
    }

    #[test]
    fn reorder_rejects_unknown_and_duplicate_ids() {
        let mut page = Page::new("Home", "home", PageType::Home);
        page.sections.push(section(0, true));
        page.sections.push(section(1, true));

        let first = page.sections[0].id;
        assert!(page.reorder_sections(&[first, Uuid::new_v4()]).is_err());
        assert!(page.reorder_sections(&[first, first]).is_err());
        assert!(page.reorder_sections(&[first]).is_err());
    }

    #[test]
    fn remove_section_closes_order_gap() {
        let mut page = Page::new("Home", "home", PageType::Home);
        page.sections.push(section(0, true));
        page.sections.push(section(1, true));
        page.sections.push(section(2, true));

        let middle = page.sections[1].id;
        page.remove_section(middle).unwrap();

        let orders: Vec<i32> = page.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn slugify_normalizes_titles() {
        assert_eq!(slugify("Our Services!"), "our-services");
        assert_eq!(slugify("  Hello --- World  "), "hello-world");
        assert_eq!(slugify("Déjà vu"), "d-j-vu");
    }
}
