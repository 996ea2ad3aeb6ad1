//! Site configuration
//!
//! Read once at startup from environment variables, with development defaults:
//!
//! | Variable          | Default                     |
//! |-------------------|-----------------------------|
//! | `PORT`            | `3000`                      |
//! | `BIND_ADDR`       | `0.0.0.0`                   |
//! | `PUBLIC_BASE_URL` | `http://localhost:{PORT}`   |
//! | `STATIC_DIR`      | `static`                    |
//! | `SITE_NAME`       | `Science Calculators`       |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_NAME: &str = "Science Calculators";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),
    #[error("BIND_ADDR must be an IP address, got '{0}'")]
    InvalidBindAddr(String),
    #[error("PUBLIC_BASE_URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub port: u16,
    pub bind_addr: IpAddr,
    /// Absolute origin used for share and canonical links, without trailing slash
    pub public_base_url: String,
    pub static_dir: PathBuf,
    pub site_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            static_dir: PathBuf::from("static"),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidBindAddr(raw.clone()))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let public_base_url = match get("PUBLIC_BASE_URL") {
            Some(raw) => {
                let url = raw.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(raw));
                }
                url
            }
            None => format!("http://localhost:{}", port),
        };

        Ok(Self {
            port,
            bind_addr,
            public_base_url,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            site_name: get("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Absolute URL for a site path such as `/calculator/bmi`
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.public_base_url, path)
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  BIND: {}", self.socket_addr());
        tracing::info!("  PUBLIC_BASE_URL: {}", self.public_base_url);
        tracing::info!("  STATIC_DIR: {}", self.static_dir.display());
        tracing::info!("  SITE_NAME: {}", self.site_name);
    }
}
