//! Site configuration (_config.yml + environment)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Public URL used when `NEXT_PUBLIC_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://0717records.com";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub base_url: String,
    /// IANA zone used to display event dates
    pub timezone: String,

    // Directory
    pub static_dir: String,

    // Services
    #[serde(default)]
    pub sanity: SanityConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "0717 Records".to_string(),
            description: "Independent record label".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: "Europe/London".to_string(),
            static_dir: "static".to_string(),
            sanity: SanityConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from `base_dir` if present, then apply the process environment
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override fields from environment-style variables.
    ///
    /// Empty values are ignored, so an exported-but-blank variable keeps the
    /// file or default value.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("NEXT_PUBLIC_BASE_URL") {
            self.base_url = url;
        }
        if let Some(project_id) = get("SANITY_PROJECT_ID") {
            self.sanity.project_id = project_id;
        }
        if let Some(dataset) = get("SANITY_DATASET") {
            self.sanity.dataset = dataset;
        }
        if let Some(version) = get("SANITY_API_VERSION") {
            self.sanity.api_version = version;
        }
        if let Some(token) = get("SANITY_API_READ_TOKEN") {
            self.sanity.token = Some(token);
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Resolve the configured display timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
            chrono_tz::UTC
        })
    }
}

/// CMS (Sanity) connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Read token, only sent by live (server-side) fetches
    pub token: Option<String>,
    /// Revalidation window for live responses
    pub revalidate_secs: u64,
    pub timeout_secs: u64,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            token: None,
            revalidate_secs: 60,
            timeout_secs: 10,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.base_url, "https://0717records.com");
        assert_eq!(config.sanity.dataset, "production");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Test Label
timezone: America/New_York
sanity:
  project_id: abc123
  revalidate_secs: 300
server:
  port: 8080
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Test Label");
        assert_eq!(config.sanity.project_id, "abc123");
        assert_eq!(config.sanity.revalidate_secs, 300);
        assert_eq!(config.sanity.dataset, "production");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tz(), chrono_tz::America::New_York);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("NEXT_PUBLIC_BASE_URL", "https://staging.example.com/"),
            ("SANITY_PROJECT_ID", "proj"),
            ("SANITY_API_READ_TOKEN", "secret"),
            ("SANITY_DATASET", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = SiteConfig::default();
        config.apply_env_with(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url(), "https://staging.example.com");
        assert_eq!(config.sanity.project_id, "proj");
        assert_eq!(config.sanity.token.as_deref(), Some("secret"));
        assert_eq!(config.sanity.dataset, "production");
    }

    #[test]
    fn test_unset_base_url_uses_fallback() {
        let mut config = SiteConfig::default();
        config.apply_env_with(|_| None);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "static_dir: assets\n").unwrap();
        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.static_dir, "assets");
        assert_eq!(config.title, "0717 Records");
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let config = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.tz(), chrono_tz::UTC);
    }
}
