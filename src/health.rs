use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::AppContext;

/// Health check status
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check result for a single component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: Vec<ComponentHealth>,
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status_code = match self.status {
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status_code, Json(self)).into_response()
    }
}

/// Trait for implementing health checks
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;
    fn check(
        &self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ComponentHealth> + Send + '_>>;
}

/// Reports whether the relay can deliver right now.
///
/// Missing credentials or recipient only degrade the service: the process
/// keeps answering and each submission gets the configuration error.
pub struct MailerHealthCheck {
    context: AppContext,
}

impl MailerHealthCheck {
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }

    fn evaluate(&self) -> ComponentHealth {
        let mail = &self.context.config.mail;
        let (status, message) = if !self.context.dispatcher.is_healthy() {
            (HealthStatus::Unhealthy, "Mail transport is not usable")
        } else if mail.credentials().is_none() {
            (HealthStatus::Degraded, "Mail credentials are not configured")
        } else if mail.recipient().is_none() {
            (HealthStatus::Degraded, "Recipient address is not configured")
        } else {
            (HealthStatus::Healthy, "Mail relay is configured")
        };

        ComponentHealth {
            name: self.name().to_string(),
            status,
            message: Some(message.to_string()),
        }
    }
}

impl HealthCheck for MailerHealthCheck {
    fn name(&self) -> &str {
        "mailer"
    }

    fn check(
        &self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ComponentHealth> + Send + '_>> {
        Box::pin(async move { self.evaluate() })
    }
}

/// Health check manager that runs all registered checks
#[derive(Default)]
pub struct HealthChecker {
    checks: Vec<Arc<dyn HealthCheck>>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub async fn check_health(&self) -> HealthResponse {
        let mut checks = Vec::new();
        let mut overall_status = HealthStatus::Healthy;

        for check in &self.checks {
            let result = check.check().await;

            match result.status {
                HealthStatus::Unhealthy => overall_status = HealthStatus::Unhealthy,
                HealthStatus::Degraded if overall_status == HealthStatus::Healthy => {
                    overall_status = HealthStatus::Degraded
                }
                _ => {}
            }

            checks.push(result);
        }

        HealthResponse {
            status: overall_status,
            checks,
        }
    }
}

/// Handler for the health endpoint
pub async fn health_handler(State(ctx): State<AppContext>) -> HealthResponse {
    HealthChecker::new()
        .with_check(Arc::new(MailerHealthCheck::new(ctx)))
        .check_health()
        .await
}

/// `/health` route, still waiting for the `AppContext` state
pub fn health_routes() -> Router<AppContext> {
    Router::new().route("/health", get(health_handler))
}
