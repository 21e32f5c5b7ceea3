//! The submission handler shared by the server and the function.
//!
//! A request moves through method check, configuration check and a single
//! dispatch. Every outcome is a [`Reply`] with a fixed status and body.

use axum::http::Method;

use crate::app::AppContext;
use crate::error::SubmissionError;
use crate::http::response::Reply;
use crate::submission::{HireRequest, Sender, build_email};

/// Handle one request to the send-email endpoint
pub async fn handle(ctx: &AppContext, method: &Method, body: &[u8]) -> Reply {
    match process(ctx, method, body).await {
        Ok(reply) => reply,
        Err(err) => err.into_reply(),
    }
}

async fn process(
    ctx: &AppContext,
    method: &Method,
    body: &[u8],
) -> Result<Reply, SubmissionError> {
    if *method == Method::OPTIONS {
        return Ok(Reply::empty());
    }
    if *method != Method::POST {
        return Err(SubmissionError::MethodNotAllowed(method.clone()));
    }

    let mail = &ctx.config.mail;
    let credentials = mail
        .credentials()
        .ok_or(SubmissionError::MissingCredentials)?;
    let recipient = mail.recipient().ok_or(SubmissionError::MissingRecipient)?;

    let request = HireRequest::from_body(body)?;
    let email = build_email(
        &request,
        Sender {
            name: &mail.sender_name,
            account: &credentials.account,
        },
        recipient,
    );

    let receipt = ctx.dispatcher.dispatch(&credentials, &email).await?;
    tracing::info!(
        response = %receipt.response,
        service = %request.service,
        "Email sent"
    );

    Ok(Reply::sent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::http::response::ReplyBody;
    use crate::testing::MockDispatcher;
    use crate::traits::mailer::DispatchError;
    use axum::http::StatusCode;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    const BODY: &[u8] = br#"{"name":"John Doe","phone":"0712345678","email":"john@x.com","service":"Plumbing","message":"","otherDetail":""}"#;

    fn context(mock: Arc<MockDispatcher>) -> AppContext {
        let config = ConfigBuilder::new()
            .with_credentials("relay@example.com", "app-password")
            .with_recipient("office@example.com")
            .build()
            .unwrap();
        AppContext::new(config, mock)
    }

    /// Collects formatted log lines written while it is the default subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn message(reply: &Reply) -> String {
        match &reply.body {
            Some(ReplyBody::Outcome(outcome)) => outcome.message.clone(),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_preflight_is_empty_ok() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let reply = handle(&context(mock.clone()), &Method::OPTIONS, b"").await;
        assert_eq!(reply, Reply::empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let ctx = context(mock.clone());
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let reply = handle(&ctx, &method, BODY).await;
            assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(reply.body_json().as_deref(), Some(r#"{"error":"Method not allowed"}"#));
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_skips_dispatch() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let config = ConfigBuilder::new()
            .with_recipient("office@example.com")
            .build()
            .unwrap();
        let ctx = AppContext::new(config, mock.clone());

        let reply = handle(&ctx, &Method::POST, BODY).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(&reply), "Server configuration error: Missing credentials.");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_recipient_skips_dispatch() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let config = ConfigBuilder::new()
            .with_credentials("relay@example.com", "app-password")
            .build()
            .unwrap();
        let ctx = AppContext::new(config, mock.clone());

        let reply = handle(&ctx, &Method::POST, BODY).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(&reply), "Server configuration error: Missing recipient.");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let reply = handle(&context(mock.clone()), &Method::POST, b"name=John").await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&reply), "Invalid request body.");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_dispatches_once() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let reply = handle(&context(mock.clone()), &Method::POST, BODY).await;

        assert_eq!(reply, Reply::sent());
        assert_eq!(mock.call_count(), 1);

        let (credentials, email) = mock.last_call().unwrap();
        assert_eq!(credentials.account, "relay@example.com");
        assert_eq!(email.sender(), "\"Double Star Website\" <relay@example.com>");
        assert_eq!(email.to, "office@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("john@x.com"));
        assert_eq!(email.subject, "Double Star Hire Request: Plumbing");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_generic() {
        let mock = Arc::new(MockDispatcher::failing(DispatchError::Transport(
            "535 5.7.8 Username and Password not accepted".into(),
        )));
        let reply = handle(&context(mock.clone()), &Method::POST, BODY).await;

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            reply.body_json().as_deref(),
            Some(r#"{"success":false,"message":"Failed to send email."}"#)
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_logged_with_detail() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mock = Arc::new(MockDispatcher::failing(DispatchError::Transport(
            "535 5.7.8 Username and Password not accepted".into(),
        )));
        let reply = handle(&context(mock), &Method::POST, BODY).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);

        let output = logs.contents();
        assert!(output.contains("ERROR"), "no error line in {output:?}");
        assert!(output.contains("Error sending email"));
        assert!(output.contains("535 5.7.8 Username and Password not accepted"));
    }

    #[tokio::test]
    async fn test_success_is_not_logged_as_error() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        handle(&context(Arc::new(MockDispatcher::succeeding())), &Method::POST, BODY).await;

        let output = logs.contents();
        assert!(output.contains("Email sent"));
        assert!(!output.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_empty_post_body_still_dispatches() {
        let mock = Arc::new(MockDispatcher::succeeding());
        let reply = handle(&context(mock.clone()), &Method::POST, b"").await;

        assert_eq!(reply, Reply::sent());
        let (_, email) = mock.last_call().unwrap();
        assert_eq!(email.subject, "Double Star Hire Request: ");
        assert!(email.reply_to.is_none());
    }
}
