//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label used for requests that matched no registered resource
pub const UNMATCHED_ROUTE: &str = "/unmatched";

/// Registered route pattern for a request
///
/// Only meaningful once routing has run. Paths that match nothing collapse
/// into a single label so scanners cannot inflate metric cardinality.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
