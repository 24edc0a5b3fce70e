use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use super::model::MemeSearchQuery;
use crate::AppState;
use crate::error::SearchError;
use crate::middleware::ClientIp;
use crate::proxy::SearchOutcome;

/// 搜索表情
#[axum::debug_handler]
pub async fn search_memes(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    params: Result<Query<MemeSearchQuery>, QueryRejection>,
) -> Result<Json<SearchOutcome>, SearchError> {
    // 查询串无法解析时同样返回 JSON 错误体
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected meme search query");
        SearchError::InvalidRequest
    })?;
    let outcome = state
        .proxy
        .search(&ip, params.query(), &params.provider(), params.limit())
        .await?;
    Ok(Json(outcome))
}
