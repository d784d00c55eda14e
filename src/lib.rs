use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod portal;

pub mod routes;

use cache::PageCache;
use config::Config;
use portal::Portal;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub portal: Arc<dyn Portal>,
    pub cache: Arc<Mutex<PageCache>>,
}

impl AppState {
    pub fn new(config: Config, portal: Arc<dyn Portal>) -> Self {
        AppState {
            config,
            portal,
            cache: Arc::new(Mutex::new(PageCache::new())),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::packages::list_packages))
        .route("/now", get(routes::packages::list_packages_now))
        .route("/clear", get(routes::packages::clear_cache))
        // 公开接口，所有来源都放行
        .layer(CorsLayer::permissive())
        .with_state(state)
}
