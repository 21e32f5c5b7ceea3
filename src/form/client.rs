use async_trait::async_trait;

use crate::http::{ContactResponse, SEND_EMAIL_PATH};
use crate::submission::HireRequest;

/// What came back from one POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    pub status: u16,
    /// `None` when the body was not a `{success, message}` object
    pub body: Option<ContactResponse>,
}

impl SubmitReply {
    pub fn new(status: u16, body: Option<ContactResponse>) -> Self {
        Self { status, body }
    }

    /// 2xx and `success: true`; either alone is a failure
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.as_ref().is_some_and(|b| b.success)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server unreachable: {0}")]
    Unreachable(String),
}

/// One submission POST
#[async_trait]
pub trait SubmitClient: Send + Sync {
    async fn submit(&self, request: &HireRequest) -> Result<SubmitReply, ClientError>;
}

#[async_trait]
impl<T: SubmitClient + ?Sized> SubmitClient for std::sync::Arc<T> {
    async fn submit(&self, request: &HireRequest) -> Result<SubmitReply, ClientError> {
        (**self).submit(request).await
    }
}

/// Posts submissions as JSON to `{base_url}/api/send-email`
#[derive(Debug, Clone)]
pub struct HttpSubmitClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SEND_EMAIL_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitClient for HttpSubmitClient {
    async fn submit(&self, request: &HireRequest) -> Result<SubmitReply, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = match serde_json::from_slice::<ContactResponse>(&bytes) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(status, error = %e, "Submission reply is not a contact response");
                None
            }
        };

        Ok(SubmitReply { status, body })
    }
}
