use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const SENT_MESSAGE: &str = "Email sent successfully!";
pub const FAILED_MESSAGE: &str = "Failed to send email.";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Server configuration error: Missing credentials.";
pub const MISSING_RECIPIENT_MESSAGE: &str = "Server configuration error: Missing recipient.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// `{success, message}` result of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT_MESSAGE.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// JSON body of a handler reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyBody {
    Outcome(ContactResponse),
    Rejected { error: String },
}

/// Transport-neutral handler reply, rendered by each deployment shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    /// `None` renders as an empty body
    pub body: Option<ReplyBody>,
}

impl Reply {
    /// 200 with no body (pre-flight)
    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    pub fn sent() -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(ReplyBody::Outcome(ContactResponse::sent())),
        }
    }

    /// Serialized body, if any
    pub fn body_json(&self) -> Option<String> {
        // ReplyBody only holds strings and bools, serialization cannot fail
        self.body
            .as_ref()
            .map(|body| serde_json::to_string(body).unwrap_or_default())
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
