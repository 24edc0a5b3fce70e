use std::time::{Duration, Instant};

use crate::models::MediaResult;

/// 搜索结果缓存条目
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub timestamp: Instant,
    pub data: Vec<MediaResult>,
}

impl CacheEntry {
    /// 条目年龄严格小于 ttl 时才算新鲜
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.timestamp) < ttl
    }
}
