use std::time::Instant;

/// 单个客户端的限流窗口
#[derive(Debug, Clone, Copy)]
pub struct ClientQuota {
    pub window_start: Instant,
    pub count: u32,
}
