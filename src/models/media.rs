use std::fmt;

use serde::{Deserialize, Serialize};

/// 单次搜索允许的最小条数
pub const MIN_LIMIT: i64 = 1;
/// 单次搜索允许的最大条数
pub const MAX_LIMIT: i64 = 100;
/// 前端每页条数，limit 缺失时使用
pub const DEFAULT_LIMIT: i64 = 24;

/// 结果来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Tenor,
    Giphy,
}

impl Provider {
    /// id 前缀，同时也是序列化后的名字
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Tenor => "tenor",
            Provider::Giphy => "giphy",
        }
    }

    /// 日志和错误信息中使用的名字
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Tenor => "Tenor",
            Provider::Giphy => "Giphy",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 统一后的搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResult {
    pub id: String,
    pub provider: Provider,
    pub title: String,
    pub url: String,
    pub preview: String,
}

impl MediaResult {
    pub fn new(
        provider: Provider,
        upstream_id: &str,
        title: String,
        url: String,
        preview: String,
    ) -> Self {
        Self {
            id: format!("{}_{}", provider.as_str(), upstream_id),
            provider,
            title,
            url,
            preview,
        }
    }
}

/// 请求中的 provider 参数
///
/// 未识别的值不会报错，原样保留：它有独立的缓存键，但不会请求任何上游。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderSelection {
    Tenor,
    Giphy,
    Both,
    Other(String),
}

impl ProviderSelection {
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return ProviderSelection::Both;
        };
        match value.trim().to_lowercase().as_str() {
            "" | "both" => ProviderSelection::Both,
            "tenor" => ProviderSelection::Tenor,
            "giphy" => ProviderSelection::Giphy,
            other => ProviderSelection::Other(other.to_string()),
        }
    }

    pub fn includes(&self, provider: Provider) -> bool {
        matches!(
            (self, provider),
            (ProviderSelection::Both, _)
                | (ProviderSelection::Tenor, Provider::Tenor)
                | (ProviderSelection::Giphy, Provider::Giphy)
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProviderSelection::Tenor => "tenor",
            ProviderSelection::Giphy => "giphy",
            ProviderSelection::Both => "both",
            ProviderSelection::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 将 limit 限制在 [1, 100]，越界的值直接截断而不是拒绝
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as usize
}
