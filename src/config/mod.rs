//! Configuration module

mod site;

pub use site::SanityConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::DEFAULT_BASE_URL;
