use crate::{
    app::AppContext,
    cors::build_cors_layer,
    error::RelayError,
    health::health_routes,
    http::{RouteModule, SubmissionRoutes},
    middleware::MakeRequestUuid,
};
use axum::{Router, extract::DefaultBodyLimit};
use std::time::Duration;
use tokio::signal;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// The long-running server: the send-email route, `/health` and the
/// static site, behind the shared middleware stack
pub struct App {
    router: Router<AppContext>,
    context: AppContext,
}

impl App {
    /// Creates an App serving the submission and health routes
    pub fn new(context: AppContext) -> Self {
        let router = Router::<AppContext>::new().merge(health_routes());
        Self { router, context }.register_module(SubmissionRoutes)
    }

    /// Register a route module with the application
    pub fn register_module<M: RouteModule>(mut self, module: M) -> Self {
        self.router = module.register(self.router);
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Apply static serving, middleware and state
    ///
    /// The returned router is what `serve` runs; tests drive it directly.
    pub fn into_router(self) -> Router {
        let config = self.context.config.clone();
        let mut router = self.router;

        let static_dir = &config.site.static_dir;
        if static_dir.is_dir() {
            router = router.fallback_service(ServeDir::new(static_dir));
            tracing::info!(path = %static_dir.display(), "Static site serving enabled");
        }

        // Middleware order (from outer to inner):
        // trace, request id, CORS, body limit
        router = router.layer(DefaultBodyLimit::max(config.server.max_body_size));

        if let Some(cors_layer) = build_cors_layer(&config.cors) {
            router = router.layer(cors_layer);
        }

        router = router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        router = router.layer(TraceLayer::new_for_http());

        router.with_state(self.context)
    }

    /// Start the application server
    ///
    /// # Errors
    ///
    /// Fails when the configured address is invalid or cannot be bound.
    pub async fn serve(self) -> crate::error::Result<()> {
        let addr = self.context.config.server.addr().map_err(|e| {
            RelayError::config(format!("Invalid server address: {}", e))
        })?;

        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Server starting on http://{}", addr);
        tracing::info!(
            "Contact endpoint available at http://{}{}",
            addr,
            crate::http::SEND_EMAIL_PATH
        );

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give connections a grace period to close
    tokio::time::sleep(Duration::from_secs(1)).await;
    tracing::info!("Shutdown complete");
}
