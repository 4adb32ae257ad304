use crate::data::ConfigRule;
use crate::error::{OpenError, Result};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "OPEN_IN_APP_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default, alias = "openMapper", deserialize_with = "lenient_rules")]
    pub rules: Vec<ConfigRule>,
}

/// Rules in order, skipping entries that are not rules at all.
fn lenient_rules<'de, D>(deserializer: D) -> std::result::Result<Vec<ConfigRule>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Rule(ConfigRule),
        Malformed(IgnoredAny),
    }

    let entries = Vec::<Entry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Entry::Rule(rule) => Some(rule),
            Entry::Malformed(_) => {
                tracing::warn!(index, "skipping malformed rule");
                None
            }
        })
        .collect())
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("open-in-app")
    }

    /// `config.toml`, or `config.json` when only that one exists.
    pub fn default_path() -> PathBuf {
        let dir = Self::config_dir();
        let toml_path = dir.join("config.toml");
        let json_path = dir.join("config.json");
        if !toml_path.exists() && json_path.exists() {
            json_path
        } else {
            toml_path
        }
    }

    /// Reads the rules fresh from disk.
    ///
    /// An explicit path (argument or `OPEN_IN_APP_CONFIG`) must be readable.
    /// The default location is optional and falls back to no rules.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        if let Some(path) = explicit {
            return Self::load_from(&path)
                .map_err(|e| OpenError::Config(format!("{}: {}", path.display(), e)));
        }

        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using default strategy only");
            return Ok(Self::default());
        }

        match Self::load_from(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load config: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::parse_json(&content)?
        } else {
            toml::from_str(&content)?
        };
        tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded config");
        Ok(config)
    }

    /// Accepts either `{"rules": [...]}` or a bare array of rules, the shape
    /// the rules take when copied out of an editor settings file.
    fn parse_json(content: &str) -> Result<Self> {
        if content.trim_start().starts_with('[') {
            let mut deserializer = serde_json::Deserializer::from_str(content);
            let rules = lenient_rules(&mut deserializer)?;
            deserializer.end()?;
            Ok(Self { rules })
        } else {
            Ok(serde_json::from_str(content)?)
        }
    }
}
