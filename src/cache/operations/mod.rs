/// 缓存操作

// 搜索结果缓存
pub mod search;

// 客户端限流
pub mod rate_limit;

pub use rate_limit::RateLimitStore;
pub use search::{CacheSlot, SearchCacheStore};
