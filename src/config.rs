use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cors::CorsConfig;
use crate::traits::mailer::Credentials;
use crate::utils::{get_env_with_prefix, parse_flag};

/// Main configuration, constructed once at process start
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes (default: 1MB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

/// Which dispatcher backend delivers notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    #[default]
    Smtp,
    Console,
}

/// Mail account, recipient and relay settings
///
/// Account, secret and recipient are optional here: their absence is a
/// per-request configuration error, not a startup failure.
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Sending account address (`EMAIL_USER`)
    #[serde(default)]
    pub account: Option<String>,
    /// Account secret (`EMAIL_PASS`)
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,
    /// Destination address (`RECIPIENT_EMAIL`)
    #[serde(default)]
    pub recipient: Option<String>,
    /// Display name paired with the account address
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default)]
    pub transport: MailTransport,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

/// Static site served next to the API by the long-running server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            account: None,
            secret: None,
            recipient: None,
            sender_name: default_sender_name(),
            transport: MailTransport::default(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            starttls: default_starttls(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB default
}

fn default_sender_name() -> String {
    "Double Star Website".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl ServerConfig {
    pub fn addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl MailConfig {
    /// Account and secret, if both are configured and non-empty
    pub fn credentials(&self) -> Option<Credentials> {
        let account = self.account.as_deref().filter(|a| !a.is_empty())?;
        let secret = self.secret.as_deref().filter(|s| !s.is_empty())?;
        Some(Credentials::new(account, secret))
    }

    /// Configured recipient, if non-empty
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref().filter(|r| !r.is_empty())
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("account", &self.account)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("recipient", &self.recipient)
            .field("sender_name", &self.sender_name)
            .field("transport", &self.transport)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("starttls", &self.starttls)
            .finish()
    }
}

/// Builder for Config with environment variable support
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set the maximum request body size in bytes
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.server.max_body_size = max_body_size;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.config.logging.json = enabled;
        self
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.config.cors = cors;
        self
    }

    /// Set the mail account address and secret
    pub fn with_credentials(mut self, account: impl Into<String>, secret: impl Into<String>) -> Self {
        self.config.mail.account = Some(account.into());
        self.config.mail.secret = Some(secret.into());
        self
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.config.mail.recipient = Some(recipient.into());
        self
    }

    pub fn with_mail(mut self, mail: MailConfig) -> Self {
        self.config.mail = mail;
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.site.static_dir = dir.into();
        self
    }

    /// Load configuration from environment variables with HIRE_RELAY_ prefix
    pub fn from_env(mut self) -> Self {
        if let Some(host) = get_env_with_prefix("HOST") {
            self.config.server.host = host;
        }
        // HIRE_RELAY_PORT first, then PORT (what most platforms inject)
        if let Some(port) = get_env_with_prefix("PORT") {
            if let Ok(p) = port.parse() {
                self.config.server.port = p;
            }
        }
        if let Some(max_body_size) = get_env_with_prefix("MAX_BODY_SIZE") {
            if let Ok(size) = max_body_size.parse() {
                self.config.server.max_body_size = size;
            }
        }
        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            self.config.logging.level = level;
        }
        if let Some(json) = get_env_with_prefix("LOG_JSON") {
            self.config.logging.json = parse_flag(&json).unwrap_or(false);
        }

        self.config.cors = CorsConfig::from_env();

        let mail = &mut self.config.mail;
        mail.account = get_env_with_prefix("EMAIL_USER");
        mail.secret = get_env_with_prefix("EMAIL_PASS");
        mail.recipient = get_env_with_prefix("RECIPIENT_EMAIL");
        if let Some(name) = get_env_with_prefix("SENDER_NAME") {
            mail.sender_name = name;
        }
        if let Some(transport) = get_env_with_prefix("MAIL_TRANSPORT") {
            mail.transport = match transport.to_ascii_lowercase().as_str() {
                "console" => MailTransport::Console,
                _ => MailTransport::Smtp,
            };
        }
        if let Some(host) = get_env_with_prefix("SMTP_HOST") {
            mail.smtp_host = host;
        }
        if let Some(port) = get_env_with_prefix("SMTP_PORT") {
            if let Ok(p) = port.parse() {
                mail.smtp_port = p;
            }
        }
        if let Some(starttls) = get_env_with_prefix("SMTP_STARTTLS") {
            mail.starttls = parse_flag(&starttls).unwrap_or(true);
        }

        if let Some(dir) = get_env_with_prefix("STATIC_DIR") {
            self.config.site.static_dir = PathBuf::from(dir);
        }

        self
    }

    /// Build the configuration, validating all settings
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid listen address, port 0, an unknown log
    /// level, a zero body limit, an unusable CORS combination or an empty
    /// SMTP host. Missing mail credentials are not an error here.
    pub fn build(self) -> crate::error::Result<Config> {
        let config = self.config;

        config.server.addr().map_err(|e| {
            crate::error::RelayError::config(format!(
                "Invalid server address {}:{} - {}",
                config.server.host, config.server.port, e
            ))
        })?;

        if config.server.port == 0 {
            return Err(crate::error::RelayError::config(
                "Server port must be greater than 0",
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(crate::error::RelayError::config(format!(
                "Invalid log level: {}. Must be one of: {}",
                config.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        if config.server.max_body_size == 0 {
            return Err(crate::error::RelayError::config(
                "Maximum body size must be greater than 0",
            ));
        }

        // tower-http refuses credentials combined with wildcards
        if config.cors.allow_credentials
            && (config.cors.allows_any_origin() || config.cors.allows_any_header())
        {
            return Err(crate::error::RelayError::config(
                "CORS credentials cannot be combined with wildcard origins or headers",
            ));
        }

        if config.mail.smtp_host.is_empty() {
            return Err(crate::error::RelayError::config("SMTP host must not be empty"));
        }

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
