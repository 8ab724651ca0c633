//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Proxy headers checked for the originating client, most trusted first
const CLIENT_IP_HEADERS: &[&str] = &["X-Forwarded-For", "X-Real-IP", "CF-Connecting-IP"];

/// Best-effort client IP for request logs
///
/// `X-Forwarded-For` may carry a chain; the first hop is the client.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for name in CLIENT_IP_HEADERS {
        if let Some(value) = req.headers().get(*name).and_then(|h| h.to_str().ok())
            && let Some(ip) = value.split(',').next().map(str::trim)
            && !ip.is_empty()
        {
            return ip.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
