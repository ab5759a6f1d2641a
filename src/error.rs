use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Duplicate slug '{slug}' in {collection}")]
    DuplicateSlug {
        collection: &'static str,
        slug: String,
    },

    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),

    #[error("Unknown variant '{variant}' for section type {section_type}")]
    UnknownVariant {
        section_type: String,
        variant: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl CmsError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        CmsError::NotFound {
            entity,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;
