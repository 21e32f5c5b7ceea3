//! Mail dispatcher trait
//!
//! A dispatcher performs exactly one delivery attempt for a fully formed
//! message. Swap SMTP for the console dispatcher (or a test double) without
//! touching the submission handler.

use async_trait::async_trait;
use std::fmt;

/// Mail account credentials, supplied per dispatch
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// An email message ready to hand to a dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Display name paired with the sender address (e.g. "Double Star Website")
    pub from_name: Option<String>,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Reply-to address (optional)
    pub reply_to: Option<String>,
    /// Email subject line
    pub subject: String,
    /// HTML body
    pub html: String,
}

impl OutgoingEmail {
    /// Create a new email with the required fields
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from_name: None,
            from: from.into(),
            to: to.into(),
            reply_to: None,
            subject: subject.into(),
            html: String::new(),
        }
    }

    /// Set the sender display name
    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Set the reply-to address; empty addresses are ignored
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        self.reply_to = if address.is_empty() { None } else { Some(address) };
        self
    }

    /// Set the HTML body
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = body.into();
        self
    }

    /// The RFC 5322 style sender, e.g. `"Double Star Website" <relay@example.com>`
    pub fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("\"{}\" <{}>", name, self.from),
            None => self.from.clone(),
        }
    }

    /// Validate the email has required fields
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.from.is_empty() {
            return Err(DispatchError::Invalid("'from' is required".into()));
        }
        if self.to.is_empty() {
            return Err(DispatchError::Invalid("'to' is required".into()));
        }
        if self.subject.is_empty() {
            return Err(DispatchError::Invalid("'subject' is required".into()));
        }
        if self.html.is_empty() {
            return Err(DispatchError::Invalid("an HTML body is required".into()));
        }
        Ok(())
    }
}

/// Provider acknowledgement for a delivered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Opaque provider response, e.g. `250 2.0.0 OK`
    pub response: String,
}

impl DeliveryReceipt {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Why a delivery attempt failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid message: {0}")]
    Invalid(String),

    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Mail dispatcher trait
///
/// # Example
///
/// ```rust,ignore
/// use hire_relay::traits::mailer::{Credentials, DeliveryReceipt, DispatchError, MailDispatcher, OutgoingEmail};
/// use async_trait::async_trait;
///
/// struct MyDispatcher;
///
/// #[async_trait]
/// impl MailDispatcher for MyDispatcher {
///     async fn dispatch(
///         &self,
///         credentials: &Credentials,
///         email: &OutgoingEmail,
///     ) -> Result<DeliveryReceipt, DispatchError> {
///         Ok(DeliveryReceipt::new("accepted"))
///     }
///
///     fn is_healthy(&self) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Attempt one delivery of `email` using `credentials`.
    ///
    /// Implementations must not retry; timeouts are the transport's own.
    async fn dispatch(
        &self,
        credentials: &Credentials,
        email: &OutgoingEmail,
    ) -> Result<DeliveryReceipt, DispatchError>;

    /// Check if the dispatcher backend is usable
    fn is_healthy(&self) -> bool;
}
