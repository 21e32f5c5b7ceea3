//! Single-invocation deployment shape.
//!
//! Runs the shared handler and writes the CORS headers onto every reply
//! itself, since there is no middleware stack in front of a function.

use axum::http::{
    HeaderMap, HeaderValue, Method, StatusCode,
    header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
    },
};

use crate::app::AppContext;
use crate::cors::{ALLOWED_HEADERS, ALLOWED_METHODS};
use crate::handler;

/// Transport-neutral function reply
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON body; `None` for the empty pre-flight reply
    pub body: Option<String>,
}

/// The four CORS headers attached to every function reply
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    if let Ok(methods) = HeaderValue::from_str(&ALLOWED_METHODS.join(",")) {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, methods);
    }
    if let Ok(allowed) = HeaderValue::from_str(&ALLOWED_HEADERS.join(", ")) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allowed);
    }
    headers
}

/// Handle one invocation
pub async fn invoke(ctx: &AppContext, method: &Method, body: &[u8]) -> FunctionResponse {
    let reply = handler::handle(ctx, method, body).await;

    let mut headers = cors_headers();
    let body = reply.body_json();
    if body.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    FunctionResponse {
        status: reply.status,
        headers,
        body,
    }
}
