use crate::domain::*;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage trait for the CMS document collections. Implementations enforce
/// slug uniqueness per collection on create and update.
#[async_trait]
pub trait Storage: Send + Sync {
    // Page operations
    async fn create_page(&self, page: &mut Page) -> Result<()>;
    async fn get_page(&self, page_id: Uuid) -> Result<Option<Page>>;
    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>>;
    async fn list_pages(&self) -> Result<Vec<Page>>;
    async fn update_page(&self, page: &Page) -> Result<()>;
    async fn delete_page(&self, page_id: Uuid) -> Result<()>;

    // Service operations
    async fn create_service(&self, service: &mut Service) -> Result<()>;
    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>>;
    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>>;
    async fn update_service(&self, service: &Service) -> Result<()>;
    async fn delete_service(&self, service_id: Uuid) -> Result<()>;

    // Portfolio operations
    async fn create_portfolio_item(&self, item: &mut PortfolioItem) -> Result<()>;
    async fn get_portfolio_item(&self, item_id: Uuid) -> Result<Option<PortfolioItem>>;
    async fn list_portfolio_items(&self, active_only: bool) -> Result<Vec<PortfolioItem>>;
    async fn update_portfolio_item(&self, item: &PortfolioItem) -> Result<()>;
    async fn delete_portfolio_item(&self, item_id: Uuid) -> Result<()>;

    // Testimonial operations
    async fn create_testimonial(&self, testimonial: &mut Testimonial) -> Result<()>;
    async fn get_testimonial(&self, testimonial_id: Uuid) -> Result<Option<Testimonial>>;
    async fn list_testimonials(&self, active_only: bool) -> Result<Vec<Testimonial>>;
    async fn update_testimonial(&self, testimonial: &Testimonial) -> Result<()>;
    async fn delete_testimonial(&self, testimonial_id: Uuid) -> Result<()>;

    // Blog post operations
    async fn create_post(&self, post: &mut BlogPost) -> Result<()>;
    async fn get_post(&self, post_id: Uuid) -> Result<Option<BlogPost>>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
    async fn list_posts(&self, published_only: bool) -> Result<Vec<BlogPost>>;
    async fn update_post(&self, post: &BlogPost) -> Result<()>;
    async fn delete_post(&self, post_id: Uuid) -> Result<()>;

    // Menu operations
    async fn create_menu(&self, menu: &mut Menu) -> Result<()>;
    async fn get_menu_by_slug(&self, slug: &str) -> Result<Option<Menu>>;
    async fn list_menus(&self) -> Result<Vec<Menu>>;
    async fn update_menu(&self, menu: &Menu) -> Result<()>;
    async fn delete_menu(&self, menu_id: Uuid) -> Result<()>;

    // Settings (singleton document)
    async fn get_settings(&self) -> Result<SiteSettings>;
    async fn update_settings(&self, settings: &SiteSettings) -> Result<()>;

    // User operations
    async fn create_user(&self, user: &mut User) -> Result<()>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // Media operations
    async fn create_media_asset(&self, asset: &mut MediaAsset) -> Result<()>;
    async fn list_media_assets(&self) -> Result<Vec<MediaAsset>>;
}
