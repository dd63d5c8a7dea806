use std::io;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error type shared by the store, renderer, and handlers.
///
/// A missing page file is reported as `NotFound` so the view and edit
/// handlers can treat it as "not yet created"; every other failure maps
/// straight to an HTTP response.
#[derive(Debug)]
pub enum WikiError {
    /// The title contains characters outside the accepted set.
    InvalidTitle,
    /// No page file exists for the requested title.
    NotFound,
    /// Reading or writing a page file failed for a reason other than absence.
    Io(io::Error),
    /// Template lookup or rendering failed.
    Template(String),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::InvalidTitle => {
                (StatusCode::NOT_FOUND, "Invalid page title").into_response()
            }
            WikiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            WikiError::Io(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("I/O error: {}", e)).into_response()
            }
            WikiError::Template(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response(),
        }
    }
}
