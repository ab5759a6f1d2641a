// Collection names used by the document store and in error messages
pub const PAGES: &str = "pages";
pub const SERVICES: &str = "services";
pub const PORTFOLIO: &str = "portfolio";
pub const TESTIMONIALS: &str = "testimonials";
pub const POSTS: &str = "posts";
pub const MENUS: &str = "menus";
pub const USERS: &str = "users";

// Section type ids registered in the catalog
pub const SECTION_HERO: &str = "hero";
pub const SECTION_SERVICES: &str = "services";
pub const SECTION_PORTFOLIO: &str = "portfolio";
pub const SECTION_TESTIMONIALS: &str = "testimonials";
pub const SECTION_ABOUT: &str = "about";
pub const SECTION_CTA: &str = "cta";
pub const SECTION_CONTACT: &str = "contact";
pub const SECTION_GALLERY: &str = "gallery";
pub const SECTION_FAQ: &str = "faq";
pub const SECTION_TEXT: &str = "text";

/// Name of the session cookie issued on admin login.
pub const SESSION_COOKIE: &str = "sitesmith_session";

/// Well-known slug of the navigation menu rendered in the public layout.
pub const MAIN_MENU_SLUG: &str = "main";
