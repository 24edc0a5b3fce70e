use std::env;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub tenor_api_key: Option<String>,
    pub giphy_api_key: Option<String>,
    pub tenor_base_url: String,
    pub giphy_base_url: String,
    pub giphy_rating: String,
    pub cache_ttl_ms: u64,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "::".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            tenor_api_key: None,
            giphy_api_key: None,
            tenor_base_url: "https://g.tenor.com".to_string(),
            giphy_base_url: "https://api.giphy.com".to_string(),
            giphy_rating: "pg-13".to_string(),
            cache_ttl_ms: 30_000,
            rate_limit_window_secs: 60,
            rate_limit_requests: 60,
            upstream_timeout_secs: 10,
        }
    }
}

// 打印配置时隐藏 API 密钥
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("api_base_uri", &self.api_base_uri)
            .field("tenor_api_key", &self.tenor_api_key.as_ref().map(|_| "***"))
            .field("giphy_api_key", &self.giphy_api_key.as_ref().map(|_| "***"))
            .field("tenor_base_url", &self.tenor_base_url)
            .field("giphy_base_url", &self.giphy_base_url)
            .field("giphy_rating", &self.giphy_rating)
            .field("cache_ttl_ms", &self.cache_ttl_ms)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_requests", &self.rate_limit_requests)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，缺失或无法解析的值使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        // 空字符串视为未配置
        let secret = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let text = |key: &str, default: String| secret(key).unwrap_or(default);

        Config {
            server_host: text("SERVER_HOST", defaults.server_host),
            server_port: parse_or(lookup("SERVER_PORT"), defaults.server_port),
            api_base_uri: text("API_BASE_URI", defaults.api_base_uri),
            tenor_api_key: secret("TENOR_API_KEY"),
            giphy_api_key: secret("GIPHY_API_KEY"),
            tenor_base_url: text("TENOR_BASE_URL", defaults.tenor_base_url)
                .trim_end_matches('/')
                .to_string(),
            giphy_base_url: text("GIPHY_BASE_URL", defaults.giphy_base_url)
                .trim_end_matches('/')
                .to_string(),
            giphy_rating: text("GIPHY_RATING", defaults.giphy_rating),
            cache_ttl_ms: parse_or(lookup("CACHE_TTL_MS"), defaults.cache_ttl_ms),
            rate_limit_window_secs: parse_or(
                lookup("RATE_LIMIT_WINDOW"),
                defaults.rate_limit_window_secs,
            ),
            rate_limit_requests: parse_or(
                lookup("RATE_LIMIT_REQUESTS"),
                defaults.rate_limit_requests,
            ),
            // 0 会让每次上游请求立即超时，按未配置处理
            upstream_timeout_secs: positive_or(
                lookup("UPSTREAM_TIMEOUT_SECS"),
                defaults.upstream_timeout_secs,
            ),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn positive_or(value: Option<String>, default: u64) -> u64 {
    match parse_or(value, 0) {
        0 => default,
        secs => secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.api_base_uri, "/api");
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
        assert_eq!(config.rate_limit_window(), Duration::from_secs(60));
        assert_eq!(config.rate_limit_requests, 60);
        assert_eq!(config.giphy_rating, "pg-13");
        assert!(config.tenor_api_key.is_none());
        assert!(config.giphy_api_key.is_none());
    }

    #[test]
    fn reads_values_and_trims_base_urls() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "8080"),
            ("TENOR_API_KEY", "tenor-key"),
            ("GIPHY_BASE_URL", "http://127.0.0.1:9000/"),
            ("RATE_LIMIT_REQUESTS", "5"),
            ("CACHE_TTL_MS", "1500"),
        ]));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.tenor_api_key.as_deref(), Some("tenor-key"));
        assert_eq!(config.giphy_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.rate_limit_requests, 5);
        assert_eq!(config.cache_ttl(), Duration::from_millis(1500));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("GIPHY_API_KEY", "   ")]));
        assert!(config.giphy_api_key.is_none());
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("RATE_LIMIT_WINDOW", "-1"),
        ]));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.rate_limit_window_secs, 60);
    }

    #[test]
    fn zero_upstream_timeout_uses_default() {
        let config = Config::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "0")]));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));

        let config = Config::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "3")]));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn debug_output_hides_api_keys() {
        let config = Config::from_lookup(lookup_from(&[("TENOR_API_KEY", "super-secret")]));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("***"));
    }
}
