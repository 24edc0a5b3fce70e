use axum::{Router, routing::get};

use crate::AppState;
use crate::middleware::log_errors;
use crate::routes;

// 接口路由
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/memes", get(routes::meme::search_memes))
        .route("/ping", get(routes::ping::ping))
}

/// 创建主路由，接口挂在配置的前缀下
pub fn create_router(state: AppState) -> Router {
    let base_uri = state.config.api_base_uri.trim_end_matches('/').to_string();

    let router = if base_uri.is_empty() {
        Router::new().merge(api_routes())
    } else {
        Router::new().nest(&base_uri, api_routes())
    };

    router
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
