//! hire-relay - contact form relay for the Double Star Engineering site
//!
//! A hire request travels one way: the form controller validates it and
//! POSTs it to `/api/send-email`, the submission handler turns it into an
//! HTML notification, and a mail dispatcher makes one delivery attempt.
//!
//! # Deployment shapes
//!
//! - **Server**: [`App`] serves the endpoint, `/health` and the static site
//!   behind CORS, request-id and trace middleware.
//! - **Function**: [`function::invoke`] runs the same handler once per
//!   invocation and writes the CORS headers itself. The `function` feature
//!   builds the `hire-relay-function` binary on top of `lambda_http`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hire_relay::{App, AppContext, ConfigBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigBuilder::new().from_env().build()?;
//!     hire_relay::init_tracing_with_config(&config);
//!
//!     let ctx = AppContext::builder().with_config(config).build();
//!     App::new(ctx).serve().await?;
//!     Ok(())
//! }
//! ```

mod app;
mod config;
pub mod cors;
pub mod email;
mod error;
pub mod form;
pub mod function;
pub mod handler;
pub mod health;
pub mod http;
mod middleware;
mod server;
pub mod submission;
pub mod testing;
pub mod traits;
mod utils;

// Re-exports for public API
pub use app::{AppContext, AppContextBuilder};
pub use config::{
    Config, ConfigBuilder, LoggingConfig, MailConfig, MailTransport, ServerConfig, SiteConfig,
};
pub use cors::{CorsConfig, CorsConfigBuilder};
pub use email::{ConsoleDispatcher, SmtpDispatcher, SmtpSettings, dispatcher_from_config};
pub use error::{RelayError, Result, SubmissionError};
pub use health::{ComponentHealth, HealthCheck, HealthChecker, HealthStatus};
pub use http::{ContactResponse, Reply, ReplyBody, RouteModule, SEND_EMAIL_PATH};
pub use middleware::{MakeRequestUuid, REQUEST_ID_HEADER};
pub use server::App;
pub use submission::HireRequest;
pub use traits::{Credentials, DeliveryReceipt, DispatchError, MailDispatcher, OutgoingEmail};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "hire_relay=debug")
/// - `HIRE_RELAY_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = utils::get_env_with_prefix("LOG_JSON")
        .and_then(|v| utils::parse_flag(&v))
        .unwrap_or(false);

    install(env_filter, json_logs);
}

/// Initialize tracing from the logging section of `config`
///
/// `RUST_LOG` still wins when set, so a single module can be turned up
/// without touching `LOG_LEVEL`.
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    install(env_filter, config.logging.json);
}

fn install(env_filter: EnvFilter, json: bool) {
    // try_init: a second call (tests, embedding) keeps the first subscriber
    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
