use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Launch failed: {0}")]
    LaunchFailed(String),
}

pub type Result<T> = std::result::Result<T, OpenError>;
