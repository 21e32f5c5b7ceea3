//! The hire request submission and the notification built from it.

pub mod model;
pub mod notification;

pub use model::{HireRequest, OTHER_SERVICE};
pub use notification::{NO_MESSAGE_PLACEHOLDER, Sender, build_email};
