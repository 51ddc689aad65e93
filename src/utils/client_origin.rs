//! Client origin and referrer extraction from HTTP requests.

use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

/// Determines the caller's network address as observed by the service.
///
/// When `behind_proxy` is set, the first hop of `X-Forwarded-For` (or
/// `X-Real-IP`) wins over the socket peer. Enable it only behind a trusted
/// reverse proxy; the headers are client-controlled otherwise.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let origin = client_origin(&headers, "10.0.0.1:5000".parse().unwrap(), true);
/// assert_eq!(origin, "203.0.113.7");
/// ```
pub fn client_origin(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy && let Some(forwarded) = forwarded_ip(headers) {
        return forwarded;
    }

    peer.ip().to_string()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let from_forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let from_real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    from_forwarded_for.or_else(from_real_ip).map(str::to_string)
}

/// Returns the `Referer` header if present and valid UTF-8.
pub fn referrer(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::REFERER).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "127.0.0.1:12345".parse().unwrap()
    }

    #[test]
    fn test_origin_from_peer() {
        let headers = HeaderMap::new();
        assert_eq!(client_origin(&headers, peer(), false), "127.0.0.1");
    }

    #[test]
    fn test_forwarded_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_origin(&headers, peer(), false), "127.0.0.1");
    }

    #[test]
    fn test_forwarded_first_hop_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(client_origin(&headers, peer(), true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_origin(&headers, peer(), true), "198.51.100.2");
    }

    #[test]
    fn test_ipv6_peer() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "[::1]:8080".parse().unwrap();
        assert_eq!(client_origin(&headers, peer, false), "::1");
    }

    #[test]
    fn test_referrer_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(referrer(&headers), None);

        headers.insert(header::REFERER, HeaderValue::from_static("https://google.com"));
        assert_eq!(referrer(&headers), Some("https://google.com"));
    }
}
