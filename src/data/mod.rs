pub mod app_config;
pub mod files;
pub mod rules;

pub use app_config::AppConfig;
pub use files::list_files;
pub use rules::{AppDescriptor, Candidate, ConfigRule};
