use serde::{Deserialize, Serialize};
use crate::utils::{get_env_with_prefix, parse_flag};

/// Methods the site's static assets may call the API with
pub const ALLOWED_METHODS: [&str; 6] = ["GET", "OPTIONS", "PATCH", "DELETE", "POST", "PUT"];

/// Request headers browsers may send cross-origin
pub const ALLOWED_HEADERS: [&str; 9] = [
    "X-CSRF-Token",
    "X-Requested-With",
    "Accept",
    "Accept-Version",
    "Content-Length",
    "Content-MD5",
    "Content-Type",
    "Date",
    "X-Api-Version",
];

/// CORS configuration for the long-running server
///
/// The default lets any origin call the endpoint with the fixed method and
/// header allow-lists and no credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Whether CORS is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Allowed origins; `["*"]` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Allowed HTTP methods
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed request headers; `["*"]` allows any header
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,

    /// Exposed headers that browsers can access
    #[serde(default)]
    pub exposed_headers: Vec<String>,

    /// Whether to allow credentials (cookies, authorization headers)
    #[serde(default)]
    pub allow_credentials: bool,

    /// Maximum age for preflight request caching (in seconds)
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            exposed_headers: Vec::new(),
            allow_credentials: false,
            max_age_seconds: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Create a new CorsConfig builder
    pub fn builder() -> CorsConfigBuilder {
        CorsConfigBuilder::new()
    }

    /// Restrict to the given origins, keeping the fixed allow-lists
    pub fn restrictive(allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins,
            ..Self::default()
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }

    pub fn allows_any_header(&self) -> bool {
        self.allowed_headers.iter().any(|h| h == "*")
    }

    /// Load CORS configuration from environment variables
    /// Checks HIRE_RELAY_ prefixed vars first, falls back to unprefixed
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(enabled) = get_env_with_prefix("CORS_ENABLED") {
            config.enabled = parse_flag(&enabled).unwrap_or(true);
        }

        if let Some(origins) = get_env_with_prefix("CORS_ALLOWED_ORIGINS") {
            config.allowed_origins = split_list(&origins);
        }

        if let Some(methods) = get_env_with_prefix("CORS_ALLOWED_METHODS") {
            config.allowed_methods = split_list(&methods);
        }

        if let Some(headers) = get_env_with_prefix("CORS_ALLOWED_HEADERS") {
            config.allowed_headers = split_list(&headers);
        }

        if let Some(credentials) = get_env_with_prefix("CORS_ALLOW_CREDENTIALS") {
            config.allow_credentials = parse_flag(&credentials).unwrap_or(false);
        }

        if let Some(max_age) = get_env_with_prefix("CORS_MAX_AGE") {
            if let Ok(val) = max_age.parse() {
                config.max_age_seconds = val;
            }
        }

        config
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Builder for CorsConfig
#[must_use = "builder does nothing until you call build()"]
pub struct CorsConfigBuilder {
    config: CorsConfig,
}

impl CorsConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: CorsConfig::default(),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Add an origin, dropping the wildcard
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.allowed_origins.retain(|o| o != "*");
        self.config.allowed_origins.push(origin.into());
        self
    }

    pub fn allow_origins(mut self, origins: Vec<String>) -> Self {
        self.config.allowed_origins = origins;
        self
    }

    pub fn allow_any_origin(mut self) -> Self {
        self.config.allowed_origins = vec!["*".to_string()];
        self
    }

    pub fn allow_methods(mut self, methods: Vec<String>) -> Self {
        self.config.allowed_methods = methods;
        self
    }

    pub fn allow_headers(mut self, headers: Vec<String>) -> Self {
        self.config.allowed_headers = headers;
        self
    }

    pub fn allow_any_header(mut self) -> Self {
        self.config.allowed_headers = vec!["*".to_string()];
        self
    }

    pub fn expose_header(mut self, header: impl Into<String>) -> Self {
        self.config.exposed_headers.push(header.into());
        self
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.config.allow_credentials = allow;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.config.max_age_seconds = seconds;
        self
    }

    pub fn build(self) -> CorsConfig {
        self.config
    }
}

impl Default for CorsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_enabled() -> bool {
    true
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_allowed_methods() -> Vec<String> {
    ALLOWED_METHODS.iter().map(|m| m.to_string()).collect()
}

fn default_allowed_headers() -> Vec<String> {
    ALLOWED_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn default_max_age() -> u64 {
    3600 // 1 hour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CorsConfig::default();
        assert!(config.enabled);
        assert!(config.allows_any_origin());
        assert_eq!(config.allowed_methods.len(), 6);
        assert_eq!(config.allowed_headers.len(), 9);
        assert!(!config.allow_credentials);
    }

    #[test]
    fn test_restrictive_config() {
        let origins = vec!["https://doublestar.example".to_string()];
        let config = CorsConfig::restrictive(origins.clone());
        assert!(config.enabled);
        assert_eq!(config.allowed_origins, origins);
        assert!(!config.allows_any_origin());
        assert_eq!(config.allowed_methods.len(), 6);
    }

    #[test]
    fn test_builder_allow_origin_replaces_wildcard() {
        let config = CorsConfig::builder()
            .allow_origin("https://doublestar.example")
            .allow_origin("https://www.doublestar.example")
            .max_age(7200)
            .build();

        assert_eq!(
            config.allowed_origins,
            vec!["https://doublestar.example", "https://www.doublestar.example"]
        );
        assert_eq!(config.max_age_seconds, 7200);
    }

    #[test]
    fn test_builder_any_header() {
        let config = CorsConfig::builder().allow_any_header().build();
        assert!(config.allows_any_header());
    }

    #[test]
    fn test_split_list_trims_and_skips_empty() {
        assert_eq!(split_list(" a, b ,,c"), vec!["a", "b", "c"]);
    }
}
