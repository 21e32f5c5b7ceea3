//! Console dispatcher for development
//!
//! Prints notifications to stdout instead of sending them. Submitter PII
//! ends up in the process output, so keep it out of production.

use crate::traits::mailer::{Credentials, DeliveryReceipt, DispatchError, MailDispatcher, OutgoingEmail};
use async_trait::async_trait;

/// A dispatcher that prints emails to stdout instead of sending them
///
/// By default the HTML body is redacted. Use `with_full_output(true)` to see
/// the rendered notification while working on the template.
#[derive(Debug, Clone)]
pub struct ConsoleDispatcher {
    prefix: String,
    show_full_content: bool,
}

impl ConsoleDispatcher {
    pub fn new() -> Self {
        Self {
            prefix: "[EMAIL]".to_string(),
            show_full_content: false,
        }
    }

    /// Create a console dispatcher with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            show_full_content: false,
        }
    }

    /// Enable or disable full body output
    pub fn with_full_output(mut self, enabled: bool) -> Self {
        if enabled {
            tracing::warn!(
                "ConsoleDispatcher: full output enabled - submission content will be visible in logs"
            );
        }
        self.show_full_content = enabled;
        self
    }

    fn render(&self, credentials: &Credentials, email: &OutgoingEmail) -> Vec<String> {
        let mut lines = vec![
            format!("{} ════════════════════════════════════════", self.prefix),
            format!("{} Account:  {}", self.prefix, credentials.account),
            format!("{} From:     {}", self.prefix, email.sender()),
            format!("{} To:       {}", self.prefix, email.to),
        ];
        if email.reply_to.is_some() {
            lines.push(format!("{} Reply-To: [set]", self.prefix));
        }
        lines.push(format!("{} Subject:  {}", self.prefix, email.subject));
        lines.push(format!("{} ────────────────────────────────────────", self.prefix));

        if self.show_full_content {
            lines.push(format!("{} [HTML]", self.prefix));
            lines.extend(email.html.lines().map(|line| format!("{} {}", self.prefix, line)));
        } else {
            lines.push(format!(
                "{} [HTML] {} bytes [REDACTED]",
                self.prefix,
                email.html.len()
            ));
        }

        lines.push(format!("{} ════════════════════════════════════════", self.prefix));
        lines
    }
}

impl Default for ConsoleDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailDispatcher for ConsoleDispatcher {
    async fn dispatch(
        &self,
        credentials: &Credentials,
        email: &OutgoingEmail,
    ) -> Result<DeliveryReceipt, DispatchError> {
        email.validate()?;

        for line in self.render(credentials, email) {
            println!("{}", line);
        }

        Ok(DeliveryReceipt::new("250 printed to console"))
    }

    fn is_healthy(&self) -> bool {
        true
    }
}
