use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::cache::keys::rate_limit_key;
use crate::cache::models::ClientQuota;

/// 固定窗口限流计数
///
/// 检查与更新在同一把锁内完成，同一客户端的并发请求不会丢失计数。
/// 过期窗口不会主动清理，只在该客户端下次请求时重置。
#[derive(Debug)]
pub struct RateLimitStore {
    window: Duration,
    max_requests: u32,
    clients: Mutex<HashMap<String, ClientQuota>>,
}

impl RateLimitStore {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// 记录一次请求，返回是否放行
    pub fn check_and_increment(&self, client: &str, now: Instant) -> bool {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        let quota = clients
            .entry(rate_limit_key(client))
            .or_insert(ClientQuota {
                window_start: now,
                count: 0,
            });

        if now.saturating_duration_since(quota.window_start) > self.window {
            quota.window_start = now;
            quota.count = 1;
            return true;
        }

        quota.count = quota.count.saturating_add(1);
        quota.count <= self.max_requests
    }

    /// 当前窗口内的计数，客户端未出现过时返回 None
    pub fn current(&self, client: &str) -> Option<ClientQuota> {
        let clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        clients.get(&rate_limit_key(client)).copied()
    }
}
