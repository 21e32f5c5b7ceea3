use super::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::str::FromStr;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Parse every entry, skipping the ones that are not valid for `T`
fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

/// Build a tower-http CorsLayer from a CorsConfig
///
/// Returns `None` when CORS is disabled. Preflight requests are answered by
/// the layer itself and never reach the submission handler.
pub fn build_cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.enabled {
        return None;
    }

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(config.max_age_seconds));

    // An empty origin list leaves allow_origin unset, so no origin matches
    if config.allows_any_origin() {
        layer = layer.allow_origin(Any);
    } else if !config.allowed_origins.is_empty() {
        layer = layer.allow_origin(parse_all::<HeaderValue>(&config.allowed_origins));
    }

    let methods = parse_all::<Method>(&config.allowed_methods);
    if !methods.is_empty() {
        layer = layer.allow_methods(methods);
    }

    if config.allows_any_header() {
        layer = layer.allow_headers(Any);
    } else {
        let headers = parse_all::<HeaderName>(&config.allowed_headers);
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    let exposed = parse_all::<HeaderName>(&config.exposed_headers);
    if !exposed.is_empty() {
        layer = layer.expose_headers(exposed);
    }

    if config.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    Some(layer)
}
