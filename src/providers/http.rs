use std::time::Duration;

use crate::config::Config;
use crate::error::SearchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 构建上游共用的 HTTP 客户端，所有请求都带超时
pub fn build_client(config: &Config) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(config.upstream_timeout())
        .connect_timeout(Duration::from_secs(5).min(config.upstream_timeout()))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SearchError::UpstreamFailure(format!("failed to build HTTP client: {}", e)))
}

/// 去掉错误中的 URL，避免 API 密钥出现在日志和响应里
pub(crate) fn describe_error(label: &str, err: reqwest::Error) -> SearchError {
    let err = err.without_url();
    if err.is_timeout() {
        SearchError::UpstreamFailure(format!("{} API timed out", label))
    } else {
        SearchError::UpstreamFailure(format!("{} API request failed: {}", label, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&Config::default()).is_ok());
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("memeproxy/"));
    }
}
