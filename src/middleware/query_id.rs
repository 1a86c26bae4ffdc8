use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header carrying the query id
pub const QUERY_ID_HEADER: &str = "x-query-id";

/// Correlates the log lines of one search-then-recommend pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryId(pub Uuid);

impl QueryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reuses a valid incoming `x-query-id` or mints a new one, stores it in the
/// request extensions and echoes it on the response.
pub async fn query_id_middleware(mut request: Request, next: Next) -> Response {
    let query_id = request
        .headers()
        .get(QUERY_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(QueryId)
        .unwrap_or_default();

    request.extensions_mut().insert(query_id);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&query_id.to_string()) {
        response.headers_mut().insert(QUERY_ID_HEADER, value);
    }

    response
}

/// Request span for `TraceLayer`, tagged with the query id
pub fn make_span_with_query_id(request: &Request<Body>) -> tracing::Span {
    let query_id = request
        .extensions()
        .get::<QueryId>()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        query_id = %query_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_ids_are_unique() {
        assert_ne!(QueryId::new(), QueryId::new());
    }

    #[test]
    fn test_span_without_extension() {
        let request = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        // builds without a query id in the extensions
        let _span = make_span_with_query_id(&request);
    }
}
