//! records-site: the 0717 Records website
//!
//! Pages, posts and events are fetched from a headless CMS and rendered on the
//! server with embedded Tera templates. Home page layout is data: an ordered
//! list of content blocks dispatched through the [`builder::PageBuilder`].

pub mod builder;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod schema;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Site {
    /// Create a site from a directory (`_config.yml` + environment)
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let mut config = config::SiteConfig::discover(&base_dir)?;

        // Static assets are served relative to the site directory
        let static_dir = base_dir.join(&config.static_dir);
        config.static_dir = static_dir.to_string_lossy().into_owned();

        Ok(Self { config, base_dir })
    }

    /// CMS client for this site's project
    pub fn client(&self) -> Result<cms::SanityClient> {
        Ok(cms::SanityClient::new(&self.config.sanity)?)
    }

    /// Serve the site
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port).await
    }
}
