/// Configuration file and environment loading
pub mod app;

/// Store database connection and table creation
pub mod database;

pub use app::{AppConfig, load_app_configuration};
