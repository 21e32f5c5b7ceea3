//! Trait seams between the handler and its collaborators.

pub mod mailer;

pub use mailer::{Credentials, DeliveryReceipt, DispatchError, MailDispatcher, OutgoingEmail};
