pub mod listing;
pub mod templates;

pub use listing::PageListing;
pub use templates::TemplateRegistry;
