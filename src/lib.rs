use std::sync::Arc;

use config::Config;
use proxy::SearchCacheProxy;

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod proxy;
pub mod router;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub proxy: Arc<SearchCacheProxy>,
}

impl AppState {
    pub fn new(config: Config, proxy: SearchCacheProxy) -> Self {
        Self {
            config,
            proxy: Arc::new(proxy),
        }
    }
}
