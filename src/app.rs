use std::sync::Arc;

use crate::config::Config;
use crate::email::dispatcher_from_config;
use crate::traits::mailer::MailDispatcher;

/// Application context shared by every request
///
/// Holds the read-only configuration and the mail dispatcher. Nothing in
/// here is mutated after startup, so cloning it per request is cheap.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub dispatcher: Arc<dyn MailDispatcher>,
}

impl AppContext {
    pub fn new(config: Config, dispatcher: Arc<dyn MailDispatcher>) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Builder pattern for constructing AppContext
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("dispatcher_healthy", &self.dispatcher.is_healthy())
            .finish()
    }
}

/// Builder for AppContext with fluent API
#[must_use = "builder does nothing until you call build()"]
pub struct AppContextBuilder {
    config: Config,
    dispatcher: Option<Arc<dyn MailDispatcher>>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            dispatcher: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the dispatcher explicitly instead of deriving it from the mail config
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn MailDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn build(self) -> AppContext {
        let dispatcher = self
            .dispatcher
            .unwrap_or_else(|| dispatcher_from_config(&self.config.mail));
        AppContext::new(self.config, dispatcher)
    }
}

impl Default for AppContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
