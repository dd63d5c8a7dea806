use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use log::warn;

use crate::titles;

/// Application configuration.
///
/// Defaults suit a local run: pages in the process working directory,
/// templates under `templates/`, listener on port 8080.
pub struct Config {
    /// Directory holding the `<title>.txt` page files.
    pub data_dir: PathBuf,
    /// Directory holding `view.html` and `edit.html`.
    pub templates_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// Title the index route redirects to when its page exists.
    pub front_page: String,
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            templates_dir: PathBuf::from("templates"),
            host: "0.0.0.0".to_string(),
            port: 8080,
            front_page: "FrontPage".to_string(),
        }
    }

    /// Create a configuration from `FLATWIKI_*` environment variables,
    /// keeping the default for anything unset, empty, or malformed.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(dir) = std::env::var("FLATWIKI_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = std::env::var("FLATWIKI_TEMPLATES_DIR") {
            if !dir.is_empty() {
                config.templates_dir = PathBuf::from(dir);
            }
        }
        if let Ok(host) = std::env::var("FLATWIKI_HOST") {
            if !host.is_empty() {
                config.host = host;
            }
        }
        if let Ok(port) = std::env::var("FLATWIKI_PORT") {
            match port.parse::<u16>() {
                Ok(p) => config.port = p,
                Err(_) => warn!("ignoring invalid FLATWIKI_PORT '{}'", port),
            }
        }
        if let Ok(front) = std::env::var("FLATWIKI_FRONT_PAGE") {
            if titles::is_valid(&front) {
                config.front_page = front;
            } else if !front.is_empty() {
                warn!("ignoring invalid FLATWIKI_FRONT_PAGE '{}'", front);
            }
        }

        config
    }

    /// Get the socket address for binding. An unparseable host falls back
    /// to the unspecified IPv4 address.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(ip, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
