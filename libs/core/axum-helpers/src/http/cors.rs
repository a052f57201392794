use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer for the configured origins.
///
/// Returns `None` when no usable origin is configured, in which case the
/// router serves same-origin requests only. Unparseable origins are skipped.
pub fn create_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([header::LOCATION])
            .max_age(Duration::from_secs(3600)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origins_disables_cors() {
        assert!(create_cors_layer(&[]).is_none());
    }

    #[test]
    fn test_invalid_origins_are_skipped() {
        assert!(create_cors_layer(&["bad\norigin".to_string()]).is_none());
        assert!(
            create_cors_layer(&[
                "bad\norigin".to_string(),
                "http://localhost:3000".to_string()
            ])
            .is_some()
        );
    }
}
