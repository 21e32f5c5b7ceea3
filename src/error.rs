use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::{
    ContactResponse, FAILED_MESSAGE, INVALID_BODY_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
    MISSING_CREDENTIALS_MESSAGE, MISSING_RECIPIENT_MESSAGE, Reply, ReplyBody,
};
use crate::traits::mailer::DispatchError;

/// Process-level error for configuration and startup
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RelayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Why a submission request ended without a successful dispatch.
///
/// Every variant maps to one fixed status/body pair. The `Display` output is
/// the operator-facing description and is only ever logged; clients get
/// [`SubmissionError::public_body`].
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("mail account credentials are not configured")]
    MissingCredentials,

    #[error("recipient address is not configured")]
    MissingRecipient,

    #[error("request body is not a valid submission: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("mail delivery failed: {0}")]
    Delivery(#[from] DispatchError),
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredentials | Self::MissingRecipient | Self::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body returned to the client. Provider error content never appears here.
    pub fn public_body(&self) -> ReplyBody {
        match self {
            Self::MethodNotAllowed(_) => ReplyBody::Rejected {
                error: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            },
            Self::MissingCredentials => {
                ReplyBody::Outcome(ContactResponse::failed(MISSING_CREDENTIALS_MESSAGE))
            }
            Self::MissingRecipient => {
                ReplyBody::Outcome(ContactResponse::failed(MISSING_RECIPIENT_MESSAGE))
            }
            Self::InvalidBody(_) => ReplyBody::Outcome(ContactResponse::failed(INVALID_BODY_MESSAGE)),
            Self::Delivery(_) => ReplyBody::Outcome(ContactResponse::failed(FAILED_MESSAGE)),
        }
    }

    /// Log the full error server-side and convert it into the client reply
    pub fn into_reply(self) -> Reply {
        let status = self.status_code();
        match &self {
            Self::MethodNotAllowed(method) => {
                tracing::debug!(method = %method, "Rejected submission method");
            }
            Self::InvalidBody(_) => {
                tracing::warn!(error = %self, "Rejected malformed submission");
            }
            Self::MissingCredentials | Self::MissingRecipient => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %self,
                    "Mail relay is misconfigured"
                );
            }
            Self::Delivery(_) => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %self,
                    "Error sending email"
                );
            }
        }

        Reply {
            status,
            body: Some(self.public_body()),
        }
    }
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        self.into_reply().into_response()
    }
}
