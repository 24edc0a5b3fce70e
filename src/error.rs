use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 搜索请求可能出现的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// 查询参数 q 缺失或为空
    #[error("Missing query parameter q")]
    InvalidRequest,

    /// 客户端在当前窗口内请求过多
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// 上游服务返回非成功状态、网络错误或超时
    #[error("{0}")]
    UpstreamFailure(String),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidRequest => StatusCode::BAD_REQUEST,
            SearchError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            SearchError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            SearchError::UpstreamFailure(details) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(details),
            },
            other => ErrorResponse {
                error: other.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
