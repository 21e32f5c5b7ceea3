use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::Method,
    routing::any,
};

use crate::app::AppContext;
use crate::handler;
use crate::http::response::Reply;

/// Path the contact form posts to
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Trait for composable route modules
///
/// Each module contributes a router that still needs `AppContext` state;
/// the `App` applies the state once every module is merged.
pub trait RouteModule {
    /// Returns a router with all routes for this module
    fn routes(&self) -> Router<AppContext>;

    /// Optional: specify a path prefix for all routes in this module
    fn prefix(&self) -> Option<&str> {
        None
    }

    /// Registers this module's routes into the application router
    fn register(self, router: Router<AppContext>) -> Router<AppContext>
    where
        Self: Sized,
    {
        let routes = self.routes();

        if let Some(prefix) = self.prefix() {
            router.nest(prefix, routes)
        } else {
            router.merge(routes)
        }
    }
}

/// The `/api/send-email` endpoint
///
/// Registered with `any` so that unsupported methods reach the handler and
/// get the JSON 405 body instead of axum's empty one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionRoutes;

impl RouteModule for SubmissionRoutes {
    fn routes(&self) -> Router<AppContext> {
        Router::new().route(SEND_EMAIL_PATH, any(send_email))
    }
}

async fn send_email(State(ctx): State<AppContext>, method: Method, body: Bytes) -> Reply {
    handler::handle(&ctx, &method, &body).await
}
