//! HTTP response types and route modules.

pub mod response;
pub mod routes;

pub use response::{ContactResponse, Reply, ReplyBody};
pub use routes::{RouteModule, SEND_EMAIL_PATH, SubmissionRoutes};
