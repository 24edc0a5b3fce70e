//! 带缓存和限流的搜索代理
//!
//! 一次搜索依次经过：参数校验、客户端限流、缓存查找、并发请求上游、
//! 合并截断、写入缓存。任何一个上游失败都会让整个请求失败，失败结果不缓存，也不重试。

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join;
use serde::Serialize;

use crate::cache::keys::search_cache_key;
use crate::cache::{CacheEntry, RateLimitStore, SearchCacheStore};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::SearchError;
use crate::models::{MediaResult, Provider, ProviderSelection, clamp_limit};
use crate::providers::{GiphyClient, ProviderClient, TenorClient, build_client};

/// 代理的运行参数
#[derive(Debug, Clone)]
pub struct ProxySettings {
    pub cache_ttl: Duration,
    pub rate_limit_window: Duration,
    pub rate_limit_requests: u32,
    pub upstream_timeout: Duration,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(30),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_requests: 60,
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&Config> for ProxySettings {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: config.cache_ttl(),
            rate_limit_window: config.rate_limit_window(),
            rate_limit_requests: config.rate_limit_requests,
            upstream_timeout: config.upstream_timeout(),
        }
    }
}

/// 一次搜索的结果，序列化后即为接口响应体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<MediaResult>,
    pub cached: bool,
}

pub struct SearchCacheProxy<T = TenorClient, G = GiphyClient> {
    tenor: T,
    giphy: G,
    cache: SearchCacheStore,
    quota: RateLimitStore,
    clock: Arc<dyn Clock>,
    cache_ttl: Duration,
    upstream_timeout: Duration,
}

impl SearchCacheProxy {
    /// 按配置创建使用真实上游的代理
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let http = build_client(config)?;
        let tenor = TenorClient::new(
            http.clone(),
            config.tenor_base_url.clone(),
            config.tenor_api_key.clone(),
        );
        let giphy = GiphyClient::new(
            http,
            config.giphy_base_url.clone(),
            config.giphy_api_key.clone(),
            config.giphy_rating.clone(),
        );

        if !tenor.is_configured() {
            tracing::warn!("TENOR_API_KEY not set, Tenor results will be empty");
        }
        if !giphy.is_configured() {
            tracing::warn!("GIPHY_API_KEY not set, Giphy results will be empty");
        }

        Ok(Self::new(
            tenor,
            giphy,
            ProxySettings::from(config),
            Arc::new(SystemClock),
        ))
    }
}

impl<T: ProviderClient, G: ProviderClient> SearchCacheProxy<T, G> {
    pub fn new(tenor: T, giphy: G, settings: ProxySettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            tenor,
            giphy,
            cache: SearchCacheStore::new(),
            quota: RateLimitStore::new(settings.rate_limit_window, settings.rate_limit_requests),
            clock,
            cache_ttl: settings.cache_ttl,
            upstream_timeout: settings.upstream_timeout,
        }
    }

    /// 搜索表情
    ///
    /// * `client` - 客户端标识（通常是 IP），用于限流
    /// * `query` - 搜索词，去掉首尾空白后不能为空
    /// * `limit` - 自动截断到 [1, 100]
    pub async fn search(
        &self,
        client: &str,
        query: &str,
        provider: &ProviderSelection,
        limit: i64,
    ) -> Result<SearchOutcome, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidRequest);
        }
        let limit = clamp_limit(limit);

        if !self.quota.check_and_increment(client, self.clock.now()) {
            tracing::warn!(client, "Rate limit exceeded");
            return Err(SearchError::RateLimitExceeded);
        }

        let key = search_cache_key(query, provider, limit);
        let slot = self.cache.slot(&key);
        // 持锁直到写入完成，同键的并发请求等待后直接命中缓存
        let mut entry = slot.lock().await;

        let now = self.clock.now();
        if let Some(cached) = entry.as_ref().filter(|e| e.is_fresh(now, self.cache_ttl)) {
            tracing::debug!(%key, "cache hit");
            return Ok(SearchOutcome {
                results: cached.data.clone(),
                cached: true,
            });
        }

        tracing::debug!(%key, "cache miss, querying upstream");
        let results = self.fetch(query, provider, limit).await?;

        *entry = Some(CacheEntry {
            key,
            timestamp: now,
            data: results.clone(),
        });

        Ok(SearchOutcome {
            results,
            cached: false,
        })
    }

    pub fn cache(&self) -> &SearchCacheStore {
        &self.cache
    }

    pub fn quota(&self) -> &RateLimitStore {
        &self.quota
    }

    /// 同时请求选中的上游，全部完成后按 tenor、giphy 的顺序合并
    async fn fetch(
        &self,
        query: &str,
        provider: &ProviderSelection,
        limit: usize,
    ) -> Result<Vec<MediaResult>, SearchError> {
        let tenor = async {
            if provider.includes(Provider::Tenor) {
                self.fetch_from(&self.tenor, query, limit).await
            } else {
                Ok(Vec::new())
            }
        };
        let giphy = async {
            if provider.includes(Provider::Giphy) {
                self.fetch_from(&self.giphy, query, limit).await
            } else {
                Ok(Vec::new())
            }
        };

        // 一个失败时不取消另一个，等两者都结束再返回错误
        let (tenor, giphy) = join(tenor, giphy).await;
        let mut results = tenor?;
        results.extend(giphy?);
        results.truncate(limit);
        Ok(results)
    }

    async fn fetch_from<P: ProviderClient>(
        &self,
        client: &P,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MediaResult>, SearchError> {
        let provider = client.provider();
        match tokio::time::timeout(self.upstream_timeout, client.search(query, limit)).await {
            Ok(Ok(results)) => {
                tracing::debug!(%provider, count = results.len(), "provider returned results");
                Ok(results)
            }
            Ok(Err(err)) => {
                tracing::error!(%provider, error = %err, "provider search failed");
                Err(err)
            }
            Err(_) => {
                tracing::error!(%provider, timeout = ?self.upstream_timeout, "provider search timed out");
                Err(SearchError::UpstreamFailure(format!(
                    "{} API timed out after {}ms",
                    provider.label(),
                    self.upstream_timeout.as_millis()
                )))
            }
        }
    }
}
