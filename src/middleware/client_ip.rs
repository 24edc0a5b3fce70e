use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

/// 请求方 IP，用作限流的客户端标识
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 从连接信息获取原始IP
        let remote_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string());
        Ok(ClientIp(resolve_client_ip(&parts.headers, remote_ip.as_deref())))
    }
}

/// 依次取 X-Real-IP、X-Forwarded-For 的第一个非空项、连接地址，都没有时返回 "unknown"
pub fn resolve_client_ip(headers: &HeaderMap, remote_ip: Option<&str>) -> String {
    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .filter(|ip| !ip.trim().is_empty())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .or(remote_ip) // 降级使用连接IP
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn real_ip_header_wins() {
        let h = headers(&[("x-real-ip", "198.51.100.1"), ("x-forwarded-for", "10.0.0.1")]);
        assert_eq!(resolve_client_ip(&h, Some("127.0.0.1")), "198.51.100.1");
    }

    #[test]
    fn first_forwarded_entry_is_used() {
        let h = headers(&[("x-forwarded-for", " , 203.0.113.9, 10.0.0.2")]);
        assert_eq!(resolve_client_ip(&h, Some("127.0.0.1")), "203.0.113.9");
    }

    #[test]
    fn falls_back_to_socket_address() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), Some("::1")), "::1");
    }

    #[test]
    fn unknown_when_nothing_available() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[tokio::test]
    async fn extractor_reads_connect_info() {
        let mut request = axum::http::Request::builder()
            .uri("/api/memes")
            .body(())
            .expect("request");
        let addr: SocketAddr = "192.0.2.5:4321".parse().expect("addr");
        request.extensions_mut().insert(ConnectInfo(addr));
        let (mut parts, _) = request.into_parts();

        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &())
            .await
            .expect("infallible");
        assert_eq!(ip, "192.0.2.5");
    }
}
