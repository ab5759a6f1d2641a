use super::traits::Storage;
use crate::constants;
use crate::domain::*;
use crate::error::{CmsError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// In-memory document store. Each collection is a map behind its own lock,
/// mirroring the collections a document database would hold.
pub struct InMemoryStorage {
    pages: Arc<Mutex<HashMap<Uuid, Page>>>,
    services: Arc<Mutex<HashMap<Uuid, Service>>>,
    portfolio: Arc<Mutex<HashMap<Uuid, PortfolioItem>>>,
    testimonials: Arc<Mutex<HashMap<Uuid, Testimonial>>>,
    posts: Arc<Mutex<HashMap<Uuid, BlogPost>>>,
    menus: Arc<Mutex<HashMap<Uuid, Menu>>>,
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    media: Arc<Mutex<HashMap<Uuid, MediaAsset>>>,
    settings: Arc<Mutex<SiteSettings>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            services: Arc::new(Mutex::new(HashMap::new())),
            portfolio: Arc::new(Mutex::new(HashMap::new())),
            testimonials: Arc::new(Mutex::new(HashMap::new())),
            posts: Arc::new(Mutex::new(HashMap::new())),
            menus: Arc::new(Mutex::new(HashMap::new())),
            users: Arc::new(Mutex::new(HashMap::new())),
            media: Arc::new(Mutex::new(HashMap::new())),
            settings: Arc::new(Mutex::new(SiteSettings::default())),
        }
    }
}

/// Reject a slug already used by a different record in the collection.
fn check_slug_free<'a, I>(
    records: I,
    collection: &'static str,
    slug: &str,
    exclude: Option<Uuid>,
) -> Result<()>
where
    I: Iterator<Item = (&'a Uuid, &'a str)>,
{
    for (id, existing) in records {
        if existing == slug && Some(*id) != exclude {
            return Err(CmsError::DuplicateSlug {
                collection,
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

fn require_id(id: Option<Uuid>, entity: &'static str) -> Result<Uuid> {
    id.ok_or_else(|| CmsError::Storage {
        message: format!("Cannot update {} without an id", entity),
    })
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_page(&self, page: &mut Page) -> Result<()> {
        let mut pages = self.pages.lock().unwrap();
        check_slug_free(
            pages.iter().map(|(id, p)| (id, p.slug.as_str())),
            constants::PAGES,
            &page.slug,
            None,
        )?;

        let id = Uuid::new_v4();
        page.id = Some(id);
        pages.insert(id, page.clone());

        debug!("Created page '{}' with id {}", page.slug, id);
        Ok(())
    }

    async fn get_page(&self, page_id: Uuid) -> Result<Option<Page>> {
        let pages = self.pages.lock().unwrap();
        Ok(pages.get(&page_id).cloned())
    }

    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        let pages = self.pages.lock().unwrap();
        Ok(pages.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_pages(&self) -> Result<Vec<Page>> {
        let pages = self.pages.lock().unwrap();
        let mut all: Vec<Page> = pages.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }

    async fn update_page(&self, page: &Page) -> Result<()> {
        let page_id = require_id(page.id, "page")?;
        let mut pages = self.pages.lock().unwrap();
        if !pages.contains_key(&page_id) {
            return Err(CmsError::not_found("page", page_id.to_string()));
        }
        check_slug_free(
            pages.iter().map(|(id, p)| (id, p.slug.as_str())),
            constants::PAGES,
            &page.slug,
            Some(page_id),
        )?;
        pages.insert(page_id, page.clone());

        debug!("Updated page '{}' with id {}", page.slug, page_id);
        Ok(())
    }

    async fn delete_page(&self, page_id: Uuid) -> Result<()> {
        let mut pages = self.pages.lock().unwrap();
        pages
            .remove(&page_id)
            .map(|_| ())
            .ok_or_else(|| CmsError::not_found("page", page_id.to_string()))
    }

    async fn create_service(&self, service: &mut Service) -> Result<()> {
        let mut services = self.services.lock().unwrap();
        check_slug_free(
            services.iter().map(|(id, s)| (id, s.slug.as_str())),
            constants::SERVICES,
            &service.slug,
            None,
        )?;

        let id = Uuid::new_v4();
        service.id = Some(id);
        services.insert(id, service.clone());

        debug!("Created service '{}' with id {}", service.slug, id);
        Ok(())
    }

    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>> {
        let services = self.services.lock().unwrap();
        Ok(services.get(&service_id).cloned())
    }

    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
        let services = self.services.lock().unwrap();
        let mut all: Vec<Service> = services
            .values()
            .filter(|s| !active_only || s.is_active)
            .cloned()
            .collect();
        all.sort_by_key(|s| s.display_order);
        Ok(all)
    }

    async fn update_service(&self, service: &Service) -> Result<()> {
        let service_id = require_id(service.id, "service")?;
        let mut services = self.services.lock().unwrap();
        if !services.contains_key(&service_id) {
            return Err(CmsError::not_found("service", service_id.to_string()));
        }
        check_slug_free(
            services.iter().map(|(id, s)| (id, s.slug.as_str())),
            constants::SERVICES,
            &service.slug,
            Some(service_id),
        )?;
        services.insert(service_id, service.clone());
        Ok(())
    }

    async fn delete_service(&self, service_id: Uuid) -> Result<()> {
        let mut services = self.services.lock().unwrap();
        services
            .remove(&service_id)
            .map(|_| ())
            .ok_or_else(|| CmsError::not_found("service", service_id.to_string()))
    }

    async fn create_portfolio_item(&self, item: &mut PortfolioItem) -> Result<()> {
        let mut portfolio = self.portfolio.lock().unwrap();
        check_slug_free(
            portfolio.iter().map(|(id, p)| (id, p.slug.as_str())),
            constants::PORTFOLIO,
            &item.slug,
            None,
        )?;

        let id = Uuid::new_v4();
        item.id = Some(id);
        portfolio.insert(id, item.clone());

        debug!("Created portfolio item '{}' with id {}", item.slug, id);
        Ok(())
    }

    async fn get_portfolio_item(&self, item_id: Uuid) -> Result<Option<PortfolioItem>> {
        let portfolio = self.portfolio.lock().unwrap();
        Ok(portfolio.get(&item_id).cloned())
    }

    async fn list_portfolio_items(&self, active_only: bool) -> Result<Vec<PortfolioItem>> {
        let portfolio = self.portfolio.lock().unwrap();
        let mut all: Vec<PortfolioItem> = portfolio
            .values()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect();
        all.sort_by_key(|p| p.display_order);
        Ok(all)
    }

    async fn update_portfolio_item(&self, item: &PortfolioItem) -> Result<()> {
        let item_id = require_id(item.id, "portfolio item")?;
        let mut portfolio = self.portfolio.lock().unwrap();
        if !portfolio.contains_key(&item_id) {
            return Err(CmsError::not_found("portfolio item", item_id.to_string()));
        }
        check_slug_free(
            portfolio.iter().map(|(id, p)| (id, p.slug.as_str())),
            constants::PORTFOLIO,
            &item.slug,
            Some(item_id),
        )?;
        portfolio.insert(item_id, item.clone());
        Ok(())
    }

    async fn delete_portfolio_item(&self, item_id: Uuid) -> Result<()> {
        let mut portfolio = self.portfolio.lock().unwrap();
        portfolio
            .remove(&item_id)
            .map(|_| ())
            .ok_or_else(|| CmsError::not_found("portfolio item", item_id.to_string()))
    }

    async fn create_testimonial(&self, testimonial: &mut Testimonial) -> Result<()> {
        let id = Uuid::new_v4();
        testimonial.id = Some(id);

        let mut testimonials = self.testimonials.lock().unwrap();
        testimonials.insert(id, testimonial.clone());

        debug!(
            "Created testimonial from '{}' with id {}",
            testimonial.author_name, id
        );
        Ok(())
    }

    async fn get_testimonial(&self, testimonial_id: Uuid) -> Result<Option<Testimonial>> {
        let testimonials = self.testimonials.lock().unwrap();
        Ok(testimonials.get(&testimonial_id).cloned())
    }

    async fn list_testimonials(&self, active_only: bool) -> Result<Vec<Testimonial>> {
        let testimonials = self.testimonials.lock().unwrap();
        let mut all: Vec<Testimonial> = testimonials
            .values()
            .filter(|t| !active_only || t.is_active)
            .cloned()
            .collect();
        all.sort_by_key(|t| t.display_order);
        Ok(all)
    }

    async fn update_testimonial(&self, testimonial: &Testimonial) -> Result<()> {
        let testimonial_id = require_id(testimonial.id, "testimonial")?;
        let mut testimonials = self.testimonials.lock().unwrap();
        if !testimonials.contains_key(&testimonial_id) {
            return Err(CmsError::not_found(
                "testimonial",
                testimonial_id.to_string(),
            ));
        }
        testimonials.insert(testimonial_id, testimonial.clone());
        Ok(())
    }

    async fn delete_testimonial(&self, testimonial_id: Uuid) -> Result<()> {
        let mut testimonials = self.testimonials.lock().unwrap();
        testimonials
            .remove(&testimonial_id)
            .map(|_| ())
            .ok_or_else(|| CmsError::not_found("testimonial", testimonial_id.to_string()))
    }

    async fn create_post(&self, post: &mut BlogPost) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        check_slug_free(
            posts.iter().map(|(id, p)| (id, p.slug.as_str())),
            constants::POSTS,
            &post.slug,
            None,
        )?;

        let id = Uuid::new_v4();
        post.id = Some(id);
        posts.insert(id, post.clone());

        debug!("Created post '{}' with id {}", post.slug, id);
        Ok(())
    }

    async fn get_post(&self, post_id: Uuid) -> Result<Option<BlogPost>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.get(&post_id).cloned())
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_posts(&self, published_only: bool) -> Result<Vec<BlogPost>> {
        let posts = self.posts.lock().unwrap();
        let mut all: Vec<BlogPost> = posts
            .values()
            .filter(|p| !published_only || p.status == PageStatus::Published)
            .cloned()
            .collect();
        // Newest first
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_post(&self, post: &BlogPost) -> Result<()> {
        let post_id = require_id(post.id, "post")?;
        let mut posts = self.posts.lock().unwrap();
        if !posts.contains_key(&post_id) {
            return Err(CmsError::not_found("post", post_id.to_string()));
        }
        check_slug_free(
            posts.iter().map(|(id, p)| (id, p.slug.as_str())),
            constants::POSTS,
            &post.slug,
            Some(post_id),
        )?;
        posts.insert(post_id, post.clone());
        Ok(())
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        posts
            .remove(&post_id)
            .map(|_| ())
            .ok_or_else(|| CmsError::not_found("post", post_id.to_string()))
    }

    async fn create_menu(&self, menu: &mut Menu) -> Result<()> {
        let mut menus = self.menus.lock().unwrap();
        check_slug_free(
            menus.iter().map(|(id, m)| (id, m.slug.as_str())),
            constants::MENUS,
            &menu.slug,
            None,
        )?;

        let id = Uuid::new_v4();
        menu.id = Some(id);
        menus.insert(id, menu.clone());

        debug!("Created menu '{}' with id {}", menu.slug, id);
        Ok(())
    }

    async fn get_menu_by_slug(&self, slug: &str) -> Result<Option<Menu>> {
        let menus = self.menus.lock().unwrap();
        Ok(menus.values().find(|m| m.slug == slug).cloned())
    }

    async fn list_menus(&self) -> Result<Vec<Menu>> {
        let menus = self.menus.lock().unwrap();
        let mut all: Vec<Menu> = menus.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update_menu(&self, menu: &Menu) -> Result<()> {
        let menu_id = require_id(menu.id, "menu")?;
        let mut menus = self.menus.lock().unwrap();
        if !menus.contains_key(&menu_id) {
            return Err(CmsError::not_found("menu", menu_id.to_string()));
        }
        check_slug_free(
            menus.iter().map(|(id, m)| (id, m.slug.as_str())),
            constants::MENUS,
            &menu.slug,
            Some(menu_id),
        )?;
        menus.insert(menu_id, menu.clone());
        Ok(())
    }

    async fn delete_menu(&self, menu_id: Uuid) -> Result<()> {
        let mut menus = self.menus.lock().unwrap();
        menus
            .remove(&menu_id)
            .map(|_| ())
            .ok_or_else(|| CmsError::not_found("menu", menu_id.to_string()))
    }

    async fn get_settings(&self) -> Result<SiteSettings> {
        let settings = self.settings.lock().unwrap();
        Ok(settings.clone())
    }

    async fn update_settings(&self, settings: &SiteSettings) -> Result<()> {
        let mut current = self.settings.lock().unwrap();
        *current = settings.clone();
        debug!("Updated site settings");
        Ok(())
    }

    async fn create_user(&self, user: &mut User) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(CmsError::DuplicateSlug {
                collection: constants::USERS,
                slug: user.email.clone(),
            });
        }

        let id = Uuid::new_v4();
        user.id = Some(id);
        users.insert(id, user.clone());

        debug!("Created user '{}' with id {}", user.email, id);
        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_media_asset(&self, asset: &mut MediaAsset) -> Result<()> {
        let id = Uuid::new_v4();
        asset.id = Some(id);

        let mut media = self.media.lock().unwrap();
        media.insert(id, asset.clone());

        debug!("Stored media asset '{}' with id {}", asset.file_name, id);
        Ok(())
    }

    async fn list_media_assets(&self) -> Result<Vec<MediaAsset>> {
        let media = self.media.lock().unwrap();
        let mut all: Vec<MediaAsset> = media.values().cloned().collect();
        all.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageType;

    #[tokio::test]
    async fn duplicate_page_slug_is_rejected() {
        let storage = InMemoryStorage::new();

        let mut first = Page::new("Home", "home", PageType::Home);
        storage.create_page(&mut first).await.unwrap();

        let mut second = Page::new("Other Home", "home", PageType::Custom);
        let err = storage.create_page(&mut second).await.unwrap_err();
        assert!(matches!(err, CmsError::DuplicateSlug { .. }));
        assert!(second.id.is_none());
    }

    #[tokio::test]
    async fn update_cannot_steal_another_pages_slug() {
        let storage = InMemoryStorage::new();

        let mut home = Page::new("Home", "home", PageType::Home);
        storage.create_page(&mut home).await.unwrap();
        let mut about = Page::new("About", "about", PageType::About);
        storage.create_page(&mut about).await.unwrap();

        about.slug = "home".to_string();
        let err = storage.update_page(&about).await.unwrap_err();
        assert!(matches!(err, CmsError::DuplicateSlug { .. }));

        // Updating a page while keeping its own slug is fine
        about.slug = "about".to_string();
        about.title = "About us".to_string();
        storage.update_page(&about).await.unwrap();
    }

    #[tokio::test]
    async fn list_services_filters_inactive_and_sorts_by_order() {
        let storage = InMemoryStorage::new();
        let now = chrono::Utc::now();

        for (slug, order, active) in [("b", 1, true), ("a", 0, true), ("c", 2, false)] {
            let mut service = Service {
                id: None,
                title: slug.to_uppercase(),
                slug: slug.to_string(),
                description: String::new(),
                icon: None,
                image_url: None,
                featured: false,
                display_order: order,
                is_active: active,
                created_at: now,
            };
            storage.create_service(&mut service).await.unwrap();
        }

        let active = storage.list_services(true).await.unwrap();
        let slugs: Vec<&str> = active.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);

        let all = storage.list_services(false).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn user_emails_are_unique_case_insensitively() {
        let storage = InMemoryStorage::new();
        let now = chrono::Utc::now();

        let mut admin = User {
            id: None,
            email: "admin@example.com".to_string(),
            display_name: "Admin".to_string(),
            password_hash: "x".to_string(),
            is_active: true,
            created_at: now,
        };
        storage.create_user(&mut admin).await.unwrap();

        let mut dup = User {
            id: None,
            email: "Admin@Example.com".to_string(),
            display_name: "Dup".to_string(),
            password_hash: "y".to_string(),
            is_active: true,
            created_at: now,
        };
        assert!(storage.create_user(&mut dup).await.is_err());
    }

    #[tokio::test]
    async fn settings_upsert_round_trips() {
        let storage = InMemoryStorage::new();

        let mut settings = storage.get_settings().await.unwrap();
        settings.site_name = "Acme Studio".to_string();
        storage.update_settings(&settings).await.unwrap();

        let loaded = storage.get_settings().await.unwrap();
        assert_eq!(loaded.site_name, "Acme Studio");
    }
}
