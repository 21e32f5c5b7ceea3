//! Mail dispatcher backends
//!
//! - `SmtpDispatcher` - sends via an authenticated SMTP relay using lettre
//! - `ConsoleDispatcher` - prints to stdout (for development)
//!
//! `dispatcher_from_config` picks one from `MAIL_TRANSPORT`.

mod console;
mod smtp;

use std::sync::Arc;

use crate::config::{MailConfig, MailTransport};
use crate::traits::mailer::MailDispatcher;

pub use console::ConsoleDispatcher;
pub use smtp::{SmtpDispatcher, SmtpSettings};

// Re-export the message types for convenience
pub use crate::traits::mailer::{Credentials, DeliveryReceipt, DispatchError, OutgoingEmail};

/// Build the dispatcher selected by the mail configuration
pub fn dispatcher_from_config(config: &MailConfig) -> Arc<dyn MailDispatcher> {
    match config.transport {
        MailTransport::Smtp => {
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                "Using SMTP mail dispatcher"
            );
            Arc::new(SmtpDispatcher::new(SmtpSettings::from(config)))
        }
        MailTransport::Console => {
            tracing::info!("Using console mail dispatcher (MAIL_TRANSPORT=console)");
            Arc::new(ConsoleDispatcher::new())
        }
    }
}
