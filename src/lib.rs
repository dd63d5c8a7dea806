//! flatwiki - a minimal flat-file wiki server
//!
//! Pages are plain text files on disk, viewed and edited through a small
//! set of HTTP routes. Handlers are pure functions of the request and the
//! injected state (page store + template registry), so everything can be
//! exercised without a live listener.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod titles;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use components::{PageListing, TemplateRegistry};
pub use config::Config;
pub use errors::WikiError;
pub use handlers::router;
pub use logger::Logger;
pub use services::PageStore;
pub use types::{AppState, Page};
pub use utils::{escape_attr, escape_html};
