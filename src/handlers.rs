use axum::{
    Form, Router,
    extract::{Path as AxumPath, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use log::info;
use serde::Deserialize;

use crate::components::PageListing;
use crate::errors::WikiError;
use crate::titles;
use crate::types::{AppState, Page};

/// The explicit route table: every (method, path) pair the wiki serves.
/// Anything else falls through to the framework's 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/view/:title", get(handle_view).post(handle_view))
        .route("/edit/:title", get(handle_edit))
        .route("/save/:title", post(handle_save))
        .with_state(state)
}

/// Form payload for the save route. An absent `body` field saves an
/// empty page rather than rejecting the request.
#[derive(Debug, Deserialize)]
pub struct SavePayload {
    #[serde(default)]
    pub body: String,
}

/// Handle the index route: redirect to the front page when it exists,
/// otherwise list the stored pages.
pub async fn handle_root(State(state): State<AppState>) -> Result<Response, WikiError> {
    if state.store.exists(&state.front_page) {
        info!("front page '{}' exists, redirecting", state.front_page);
        return Ok(redirect_found(&format!("/view/{}", state.front_page)));
    }

    let titles = state.store.list()?;
    info!("serving index with {} pages", titles.len());
    let html = PageListing::new().render(&titles);
    Ok(Html(html).into_response())
}

/// Handle view requests: render the page, or send the browser to the
/// editor when the page does not exist yet.
pub async fn handle_view(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
) -> Result<Response, WikiError> {
    titles::validate(&title)?;

    match state.store.load(&title) {
        Ok(page) => {
            info!("viewing page '{}'", page.title);
            let html = state.templates.render("view", &page)?;
            Ok(Html(html).into_response())
        }
        Err(WikiError::NotFound) => {
            info!("page '{}' not yet created, redirecting to editor", title);
            Ok(redirect_found(&format!("/edit/{}", title)))
        }
        Err(err) => Err(err),
    }
}

/// Handle edit requests: render the form, pre-filled with the current
/// body or empty for a page that does not exist yet.
pub async fn handle_edit(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
) -> Result<Html<String>, WikiError> {
    titles::validate(&title)?;

    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(WikiError::NotFound) => Page::empty(title),
        Err(err) => return Err(err),
    };

    info!("editing page '{}'", page.title);
    let html = state.templates.render("edit", &page)?;
    Ok(Html(html))
}

/// Handle save requests: persist the submitted body and redirect to the
/// page's view route.
pub async fn handle_save(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
    Form(payload): Form<SavePayload>,
) -> Result<Response, WikiError> {
    titles::validate(&title)?;

    let page = Page {
        title,
        body: payload.body,
    };
    state.store.save(&page)?;

    info!("saved page '{}', redirecting to view", page.title);
    Ok(redirect_found(&format!("/view/{}", page.title)))
}

/// Build a 302 Found redirect, the status the wiki has always used.
fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
