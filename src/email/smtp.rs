//! SMTP dispatcher using lettre
//!
//! Sends the notification through an authenticated SMTP relay (Gmail by
//! default). The transport is built per dispatch from the credentials the
//! handler passes in.

use crate::config::MailConfig;
use crate::traits::mailer::{Credentials, DeliveryReceipt, DispatchError, MailDispatcher, OutgoingEmail};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials as SmtpCredentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// SMTP relay settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port (default: 587 for STARTTLS)
    pub port: u16,
    /// Use STARTTLS (default: true); `false` means implicit TLS
    pub starttls: bool,
}

impl SmtpSettings {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 587,
            starttls: true,
        }
    }

    /// Set the port (default: 587)
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use implicit TLS instead of STARTTLS
    pub fn no_starttls(mut self) -> Self {
        self.starttls = false;
        self
    }
}

impl From<&MailConfig> for SmtpSettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            starttls: config.starttls,
        }
    }
}

/// SMTP dispatcher using lettre
///
/// # Example
///
/// ```rust,ignore
/// use hire_relay::email::{SmtpDispatcher, SmtpSettings};
/// use hire_relay::traits::mailer::{Credentials, MailDispatcher, OutgoingEmail};
///
/// let dispatcher = SmtpDispatcher::new(SmtpSettings::new("smtp.gmail.com"));
/// let credentials = Credentials::new("relay@gmail.com", "app-password");
///
/// let email = OutgoingEmail::new("relay@gmail.com", "office@example.com", "Hello")
///     .html("<p>Hello</p>");
///
/// let receipt = dispatcher.dispatch(&credentials, &email).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SmtpDispatcher {
    settings: SmtpSettings,
}

impl SmtpDispatcher {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    fn transport(
        &self,
        credentials: &Credentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, DispatchError> {
        let relay = if self.settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.host)
        };
        let builder = relay.map_err(|e| {
            DispatchError::Transport(format!("Failed to create SMTP transport: {}", e))
        })?;

        Ok(builder
            .port(self.settings.port)
            .credentials(SmtpCredentials::new(
                credentials.account.clone(),
                credentials.secret.clone(),
            ))
            .build())
    }
}

fn parse_address(address: &str) -> Result<Address, DispatchError> {
    address.parse().map_err(|e| DispatchError::Address {
        address: address.to_string(),
        reason: format!("{}", e),
    })
}

/// Assemble the lettre message for an outgoing email.
///
/// The reply-to address is client supplied; when it does not parse it is
/// dropped so the notification still reaches the office.
pub(crate) fn build_message(email: &OutgoingEmail) -> Result<Message, DispatchError> {
    let from = Mailbox::new(email.from_name.clone(), parse_address(&email.from)?);
    let to = Mailbox::new(None, parse_address(&email.to)?);

    let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

    if let Some(ref reply_to) = email.reply_to {
        match parse_address(reply_to) {
            Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
            Err(e) => tracing::warn!(error = %e, "Dropping unparsable reply-to address"),
        }
    }

    builder
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| DispatchError::Build(e.to_string()))
}

#[async_trait]
impl MailDispatcher for SmtpDispatcher {
    async fn dispatch(
        &self,
        credentials: &Credentials,
        email: &OutgoingEmail,
    ) -> Result<DeliveryReceipt, DispatchError> {
        email.validate()?;

        let message = build_message(email)?;
        let transport = self.transport(credentials)?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let text: Vec<&str> = response.message().collect();
        Ok(DeliveryReceipt::new(format!("{} {}", response.code(), text.join(" "))))
    }

    fn is_healthy(&self) -> bool {
        !self.settings.host.is_empty()
    }
}
