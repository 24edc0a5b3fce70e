// 缓存模块
// 包含搜索结果缓存和客户端限流计数，均只保存在进程内存中

pub mod keys;
pub mod models;
pub mod operations;

pub use models::{CacheEntry, ClientQuota};
pub use operations::{RateLimitStore, SearchCacheStore};
