/// 缓存键模块
/// 提供各种缓存键生成函数
pub mod search_keys;

pub use search_keys::{rate_limit_key, search_cache_key};
