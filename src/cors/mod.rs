//! Cross-Origin Resource Sharing (CORS).
//!
//! The server shape applies a tower-http `CorsLayer` built from
//! [`CorsConfig`]; the function shape writes the same allow-lists as fixed
//! headers (see `crate::function`).

mod config;
mod layer;

pub use config::{ALLOWED_HEADERS, ALLOWED_METHODS, CorsConfig, CorsConfigBuilder};
pub use layer::build_cors_layer;
