use std::sync::Arc;

use crate::components::TemplateRegistry;
use crate::services::PageStore;

/// A titled unit of text content, persisted as `<title>.txt`.
///
/// Constructed from a request or from disk and discarded after the
/// response is written; nothing holds a page across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: String,
}

impl Page {
    /// Create a page with an empty body, used by the editor for titles
    /// that have no file yet.
    pub fn empty(title: String) -> Self {
        Self {
            title,
            body: String::new(),
        }
    }
}

/// Application state shared across all handlers.
///
/// Everything in here is read-only after startup; the framework clones
/// it per request.
#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub templates: Arc<TemplateRegistry>,
    pub front_page: String,
}
