//! 上游 GIF 搜索服务适配层
//!
//! 每个上游实现 [`ProviderClient`]，负责拼接请求、解析各自的响应格式，
//! 并转换成统一的 [`MediaResult`]。

mod giphy;
mod http;
mod tenor;

pub use giphy::GiphyClient;
pub use http::build_client;
pub use tenor::TenorClient;

use crate::error::SearchError;
use crate::models::{MediaResult, Provider};

/// 上游搜索服务
///
/// 未配置 API 密钥的实现应返回空列表而不是错误。
/// 实现必须是 `Send + Sync`，以便并发请求多个上游。
pub trait ProviderClient: Send + Sync {
    /// 搜索并返回最多 `limit` 条结果
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<MediaResult>, SearchError>> + Send;

    fn provider(&self) -> Provider;
}

/// 按优先级取第一个非空的 URL
pub(crate) fn first_present<'a, I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

/// 上游 id 可能是字符串或数字，缺失时返回 None
pub(crate) fn upstream_id(id: &serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// 字段为 null 时按缺失处理，使用默认值
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 上游没有标题时使用查询词
pub(crate) fn title_or_query(title: Option<&str>, query: &str) -> String {
    match title {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_present_skips_missing_and_empty() {
        let url = first_present([None, Some(""), Some("https://b"), Some("https://c")]);
        assert_eq!(url, "https://b");
    }

    #[test]
    fn first_present_defaults_to_empty() {
        assert_eq!(first_present([None, None]), "");
    }

    #[test]
    fn upstream_id_accepts_strings_and_numbers() {
        assert_eq!(upstream_id(&serde_json::json!("abc")), Some("abc".into()));
        assert_eq!(upstream_id(&serde_json::json!(42)), Some("42".into()));
        assert_eq!(upstream_id(&serde_json::json!(null)), None);
        assert_eq!(upstream_id(&serde_json::json!("")), None);
    }

    #[test]
    fn title_falls_back_to_query() {
        assert_eq!(title_or_query(None, "doge"), "doge");
        assert_eq!(title_or_query(Some(""), "doge"), "doge");
        assert_eq!(title_or_query(Some("Much wow"), "doge"), "Much wow");
    }
}
