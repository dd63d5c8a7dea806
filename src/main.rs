use std::sync::Arc;

use tokio::net::TcpListener;

use flatwiki::{AppState, Config, Logger, PageStore, TemplateRegistry, WikiError, router};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if Logger::init().is_err() {
        eprintln!("flatwiki: logger already initialized");
    }

    let config = Config::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    let templates = TemplateRegistry::load(&config.templates_dir);
    let state = AppState {
        store: PageStore::new(config.data_dir.clone()),
        templates: Arc::new(templates),
        front_page: config.front_page.clone(),
    };

    let app = router(state);
    let addr = config.socket_addr();
    log::info!("flatwiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
