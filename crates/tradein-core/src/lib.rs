pub mod app_config;
pub mod config;
pub mod quotes;
pub mod site;

pub use app_config::AppConfig;
pub use config::load_app_config_with_models;
pub use quotes::{
    Brand, Condition, PathField, Price, QuoteRecord, SelectionNode, SelectionPath,
    WideQuoteRecord, DATE_FORMAT,
};
pub use site::{load_site_profile, BrandProfile, LevelSpec, Locator, SiteProfile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read site profile {path}: {source}")]
    SiteFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site profile: {0}")]
    SiteFileParse(#[from] serde_yaml::Error),

    #[error("site profile validation failed: {0}")]
    Validation(String),
}
