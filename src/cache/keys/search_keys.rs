use crate::models::ProviderSelection;

/// 客户端限流键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成搜索结果缓存键，格式为 `查询|provider|limit`
pub fn search_cache_key(query: &str, provider: &ProviderSelection, limit: usize) -> String {
    format!("{}|{}|{}", query, provider, limit)
}

/// 生成客户端限流键
pub fn rate_limit_key(client: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_key_joins_all_parts() {
        let key = search_cache_key("doge", &ProviderSelection::Both, 24);
        assert_eq!(key, "doge|both|24");
    }

    #[test]
    fn search_key_differs_per_provider_and_limit() {
        let both = search_cache_key("cats", &ProviderSelection::Both, 24);
        let tenor = search_cache_key("cats", &ProviderSelection::Tenor, 24);
        let smaller = search_cache_key("cats", &ProviderSelection::Both, 12);
        assert_ne!(both, tenor);
        assert_ne!(both, smaller);
    }

    #[test]
    fn unknown_provider_keeps_its_own_key() {
        let key = search_cache_key("cats", &ProviderSelection::Other("imgur".into()), 5);
        assert_eq!(key, "cats|imgur|5");
    }

    #[test]
    fn rate_limit_key_is_prefixed() {
        assert_eq!(rate_limit_key("10.0.0.1"), "rate_limit:10.0.0.1");
    }
}
