//! Client origin-address resolution.
//!
//! Policy: the first comma-separated entry of `x-forwarded-for` wins when
//! present and non-empty; otherwise the direct peer address is used.

use axum::extract::connect_info::ConnectInfo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;
use std::net::SocketAddr;

/// Resolve the request's origin address from its headers and peer address.
pub fn resolve_origin(headers: &HeaderMap, peer: Option<&SocketAddr>) -> Option<String> {
    if let Some(forwarded_for) = headers.get("x-forwarded-for") {
        if let Ok(header_value) = forwarded_for.to_str() {
            let first = header_value.split(',').next().map(str::trim).unwrap_or("");
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }
    peer.map(|addr| addr.ip().to_string())
}

/// Extractor yielding the resolved origin address, when one is available.
#[derive(Debug, Clone)]
pub struct OriginAddr(pub Option<String>);

impl<S> FromRequestParts<S> for OriginAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);
        Ok(OriginAddr(resolve_origin(&parts.headers, peer.as_ref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_xff(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_first_forwarded_entry_wins() {
        let headers = headers_with_xff("192.168.1.1, 10.0.0.1, 10.0.0.2");
        assert_eq!(
            resolve_origin(&headers, None),
            Some("192.168.1.1".to_string())
        );
    }

    #[test]
    fn test_single_forwarded_entry() {
        let headers = headers_with_xff("203.0.113.7");
        assert_eq!(
            resolve_origin(&headers, None),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_empty_first_entry_falls_back_to_peer() {
        let headers = headers_with_xff(" , 10.0.0.1");
        let peer = SocketAddr::from(([127, 0, 0, 1], 8080));
        assert_eq!(
            resolve_origin(&headers, Some(&peer)),
            Some("127.0.0.1".to_string())
        );
    }

    #[test]
    fn test_missing_header_falls_back_to_peer() {
        let headers = HeaderMap::new();
        let peer = SocketAddr::from(([10, 1, 2, 3], 443));
        assert_eq!(
            resolve_origin(&headers, Some(&peer)),
            Some("10.1.2.3".to_string())
        );
    }

    #[test]
    fn test_nothing_available() {
        let headers = HeaderMap::new();
        assert_eq!(resolve_origin(&headers, None), None);
    }
}
