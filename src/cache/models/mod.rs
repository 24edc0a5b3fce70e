/// 缓存数据模型
pub mod rate_limit;
pub mod search;

pub use rate_limit::ClientQuota;
pub use search::CacheEntry;
