use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::cache::models::CacheEntry;

/// 单个缓存键对应的槽位
///
/// 持有槽位锁的请求独占该键的“检查是否过期 -> 拉取 -> 写入”过程，
/// 同一查询的并发请求会排队等待并直接命中前一个请求写入的结果。
pub type CacheSlot = Arc<tokio::sync::Mutex<Option<CacheEntry>>>;

/// 搜索结果缓存
///
/// 不做容量限制和后台清理，过期条目在同键下次写入时被覆盖。
#[derive(Debug, Default)]
pub struct SearchCacheStore {
    slots: Mutex<HashMap<String, CacheSlot>>,
}

impl SearchCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取（必要时创建）缓存键对应的槽位
    pub fn slot(&self, key: &str) -> CacheSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.to_string()).or_default().clone()
    }

    /// 读取条目，不检查是否过期
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(key).cloned()
        }?;
        let entry = slot.lock().await;
        entry.clone()
    }

    /// 写入条目，覆盖已有内容
    #[cfg(test)]
    pub async fn insert(&self, entry: CacheEntry) {
        let slot = self.slot(&entry.key);
        *slot.lock().await = Some(entry);
    }

    /// 已创建的槽位数量（包括尚未写入成功的）
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
