//! First-run provisioning: admin user, site settings, navigation, and
//! starter pages built from the section catalog's defaults.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth;
use crate::config::Config;
use crate::constants;
use crate::domain::*;
use crate::error::Result;
use crate::sections::registry;
use crate::storage::Storage;

pub async fn seed(storage: &dyn Storage, config: &Config) -> Result<()> {
    let admin_id = seed_admin(storage, config).await?;
    seed_settings(storage).await?;
    seed_menu(storage).await?;
    seed_pages(storage, admin_id).await?;
    seed_content(storage).await?;
    info!("Seed complete");
    Ok(())
}

async fn seed_admin(storage: &dyn Storage, config: &Config) -> Result<Option<Uuid>> {
    if let Some(existing) = storage.get_user_by_email(&config.admin.email).await? {
        info!(email = %existing.email, "Admin user already present, skipping");
        return Ok(existing.id);
    }

    let mut admin = User {
        id: None,
        email: config.admin.email.clone(),
        display_name: config.admin.display_name.clone(),
        password_hash: auth::hash_password(&config.admin.password),
        is_active: true,
        created_at: Utc::now(),
    };
    storage.create_user(&mut admin).await?;
    info!(email = %admin.email, "Created admin user");
    Ok(admin.id)
}

async fn seed_settings(storage: &dyn Storage) -> Result<()> {
    let mut settings = storage.get_settings().await?;
    if settings.site_name != SiteSettings::default().site_name {
        return Ok(());
    }
    settings.site_name = "Northlight Studio".to_string();
    settings.tagline = Some("Design and engineering for growing brands".to_string());
    settings.contact_email = Some("hello@northlight.example".to_string());
    settings.updated_at = Utc::now();
    storage.update_settings(&settings).await
}

async fn seed_menu(storage: &dyn Storage) -> Result<()> {
    if storage
        .get_menu_by_slug(constants::MAIN_MENU_SLUG)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let links = [("Home", "/"), ("About", "/p/about"), ("Contact", "/p/contact")];
    let items = links
        .iter()
        .enumerate()
        .map(|(i, (label, url))| MenuItem {
            id: Uuid::new_v4(),
            label: label.to_string(),
            url: url.to_string(),
            parent_id: None,
            open_in_new_tab: false,
            display_order: i as i32,
            is_visible: true,
        })
        .collect();

    let mut menu = Menu {
        id: None,
        name: "Main navigation".to_string(),
        slug: constants::MAIN_MENU_SLUG.to_string(),
        items,
        created_at: Utc::now(),
    };
    storage.create_menu(&mut menu).await?;
    info!("Created main menu");
    Ok(())
}

async fn seed_pages(storage: &dyn Storage, author_id: Option<Uuid>) -> Result<()> {
    let plans: [(&str, &str, PageType, &[&str]); 3] = [
        (
            "Home",
            "home",
            PageType::Home,
            &[
                constants::SECTION_HERO,
                constants::SECTION_SERVICES,
                constants::SECTION_TESTIMONIALS,
                constants::SECTION_CTA,
            ],
        ),
        (
            "About",
            "about",
            PageType::About,
            &[constants::SECTION_ABOUT, constants::SECTION_CTA],
        ),
        (
            "Contact",
            "contact",
            PageType::Contact,
            &[constants::SECTION_CONTACT],
        ),
    ];

    for (title, slug, page_type, section_types) in plans {
        if storage.get_page_by_slug(slug).await?.is_some() {
            continue;
        }
        let mut page = Page::new(title, slug, page_type);
        page.status = PageStatus::Published;
        page.author_id = author_id;
        for (order, section_type) in section_types.iter().enumerate() {
            let section = registry().instantiate(section_type, None, order as i32)?;
            page.sections.push(section);
        }
        storage.create_page(&mut page).await?;
        info!(slug = %slug, "Created page");
    }
    Ok(())
}

async fn seed_content(storage: &dyn Storage) -> Result<()> {
    if !storage.list_services(false).await?.is_empty() {
        return Ok(());
    }

    let services = [
        ("Brand identity", "Logos, palettes, and the voice to match."),
        ("Web design", "Marketing sites that load fast and read well."),
        ("Content strategy", "Copy and structure that convert."),
    ];
    for (order, (title, description)) in services.iter().enumerate() {
        let mut service = Service {
            id: None,
            title: title.to_string(),
            slug: slugify(title),
            description: description.to_string(),
            icon: None,
            image_url: None,
            featured: order == 0,
            display_order: order as i32,
            is_active: true,
            created_at: Utc::now(),
        };
        storage.create_service(&mut service).await?;
    }

    let mut testimonial = Testimonial {
        id: None,
        author_name: "Dana Reeve".to_string(),
        author_role: Some("Founder".to_string()),
        company: Some("Fernworks".to_string()),
        quote: "They rebuilt our site in three weeks and enquiries doubled.".to_string(),
        avatar_url: None,
        rating: Some(5),
        display_order: 0,
        is_active: true,
        created_at: Utc::now(),
    };
    storage.create_testimonial(&mut testimonial).await?;

    info!("Created starter content");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn test_config() -> Config {
        toml::from_str(
            r#"
            [server]
            [media]
            [admin]
            email = "admin@example.com"
            password = "seed-password"
            "#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn seed_provisions_admin_pages_and_menu() {
        let storage = InMemoryStorage::new();
        let config = test_config();

        seed(&storage, &config).await.unwrap();

        let admin = storage
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(crate::auth::verify_password(
            "seed-password",
            &admin.password_hash
        ));

        let home = storage.get_page_by_slug("home").await.unwrap().unwrap();
        assert_eq!(home.status, PageStatus::Published);
        assert!(!home.sections.is_empty());
        let orders: Vec<i32> = home.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, (0..home.sections.len() as i32).collect::<Vec<_>>());

        assert!(storage
            .get_menu_by_slug(constants::MAIN_MENU_SLUG)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let storage = InMemoryStorage::new();
        let config = test_config();

        seed(&storage, &config).await.unwrap();
        seed(&storage, &config).await.unwrap();

        assert_eq!(storage.list_pages().await.unwrap().len(), 3);
        assert_eq!(storage.list_services(false).await.unwrap().len(), 3);
    }
}
