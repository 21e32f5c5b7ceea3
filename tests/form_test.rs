//! Form controller behaviour, driven through the in-memory view

use std::sync::Arc;
use std::time::Duration;

use hire_relay::form::{
    ALERT_MESSAGE, ClientError, FAILED_BACKGROUND, FAILED_LABEL, FormController, FormField,
    FormValues, HttpSubmitClient, NAME_MESSAGE, OTHER_DETAIL_MESSAGE, PHONE_DIGITS_MESSAGE,
    SENDING_LABEL, SENT_BACKGROUND, SENT_LABEL, ServiceCategory, SubmitClient, SubmitOutcome,
    SubmitReply,
};
use hire_relay::testing::{MemoryView, MockDispatcher, ScriptedClient};
use hire_relay::{App, AppContext, ConfigBuilder, ContactResponse, HireRequest};

/// A server that accepts the request and never answers
struct HangingClient;

#[async_trait::async_trait]
impl SubmitClient for HangingClient {
    async fn submit(&self, _request: &HireRequest) -> Result<SubmitReply, ClientError> {
        std::future::pending().await
    }
}

fn values() -> FormValues {
    FormValues {
        name: "  John Doe ".into(),
        phone: "0712 345 678".into(),
        email: " john@x.com".into(),
        service: ServiceCategory::Plumbing.to_string(),
        message: " Leaking pipe ".into(),
        other_detail: String::new(),
    }
}

fn controller(
    client: Arc<ScriptedClient>,
) -> FormController<MemoryView, Arc<ScriptedClient>> {
    FormController::new(MemoryView::new(), client)
}

fn view_of<C: SubmitClient>(controller: &FormController<MemoryView, C>) -> MemoryView {
    controller.view().lock().unwrap().clone()
}

#[tokio::test(start_paused = true)]
async fn test_invalid_submission_sends_nothing() {
    let client = Arc::new(ScriptedClient::new().then_sent());
    let mut controller = controller(client.clone());

    let outcome = controller
        .submit(FormValues {
            name: " Al ".into(),
            phone: "12345".into(),
            service: "Other".into(),
            ..values()
        })
        .await;

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected validation failure, got {:?}", outcome);
    };
    assert_eq!(errors.len(), 3);
    assert!(client.requests().is_empty());

    let view = view_of(&controller);
    assert_eq!(view.error(FormField::Name), Some(NAME_MESSAGE));
    assert_eq!(view.error(FormField::Phone), Some(PHONE_DIGITS_MESSAGE));
    assert_eq!(view.error(FormField::OtherDetail), Some(OTHER_DETAIL_MESSAGE));
    assert_eq!(view.error(FormField::Email), None);
    assert!(!view.button.disabled);
    assert!(!controller.restore_pending());
}

#[tokio::test(start_paused = true)]
async fn test_resubmission_clears_fixed_fields() {
    let client = Arc::new(ScriptedClient::new().then_sent());
    let mut controller = controller(client.clone());

    controller
        .submit(FormValues {
            name: "Al".into(),
            ..values()
        })
        .await;
    assert!(view_of(&controller).error(FormField::Name).is_some());

    let outcome = controller.submit(values()).await;
    assert!(matches!(outcome, SubmitOutcome::Sent));
    assert!(view_of(&controller).errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_success_flow_and_restore() {
    let client = Arc::new(ScriptedClient::new().then_sent());
    let mut controller = controller(client.clone());

    let outcome = controller.submit(values()).await;
    assert!(matches!(outcome, SubmitOutcome::Sent));

    assert_eq!(
        client.requests(),
        vec![HireRequest {
            name: "John Doe".into(),
            phone: "0712 345 678".into(),
            email: "john@x.com".into(),
            service: "Plumbing".into(),
            message: "Leaking pipe".into(),
            other_detail: String::new(),
        }]
    );

    let view = view_of(&controller);
    assert_eq!(view.button_history[0].label, SENDING_LABEL);
    assert!((view.button_history[0].opacity - 0.7).abs() < f32::EPSILON);
    assert_eq!(view.button.label, SENT_LABEL);
    assert_eq!(view.button.background.as_deref(), Some(SENT_BACKGROUND));
    assert!(view.button.disabled);
    assert_eq!(view.resets, 1);
    assert!(!view.detail_visible);
    assert!(view.alerts.is_empty());

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert!(view_of(&controller).button.disabled);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let view = view_of(&controller);
    assert_eq!(view.button.label, MemoryView::SUBMIT_LABEL);
    assert_eq!(view.button.background, None);
    assert_eq!(view.button.opacity, 1.0);
    assert!(!view.button.disabled);
    assert!(!controller.restore_pending());
}

#[tokio::test(start_paused = true)]
async fn test_busy_until_restored() {
    let client = Arc::new(ScriptedClient::new().then_sent().then_sent());
    let mut controller = controller(client.clone());

    controller.submit(values()).await;
    let outcome = controller.submit(values()).await;
    assert!(matches!(outcome, SubmitOutcome::Busy));
    assert_eq!(client.requests().len(), 1);

    tokio::time::sleep(Duration::from_millis(3001)).await;
    let outcome = controller.submit(values()).await;
    assert!(matches!(outcome, SubmitOutcome::Sent));
    assert_eq!(client.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_server_failure_alerts() {
    let client = Arc::new(
        ScriptedClient::new().then_reply(500, Some(ContactResponse::failed("Failed to send email."))),
    );
    let mut controller = controller(client);

    let outcome = controller.submit(values()).await;
    assert!(matches!(outcome, SubmitOutcome::Failed));

    let view = view_of(&controller);
    assert_eq!(view.button.label, FAILED_LABEL);
    assert_eq!(view.button.background.as_deref(), Some(FAILED_BACKGROUND));
    assert_eq!(view.alerts, vec![ALERT_MESSAGE.to_string()]);
    assert_eq!(view.resets, 0);

    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert_eq!(view_of(&controller).button.label, MemoryView::SUBMIT_LABEL);
}

#[tokio::test(start_paused = true)]
async fn test_ok_status_without_success_flag_fails() {
    let client = Arc::new(
        ScriptedClient::new()
            .then_reply(200, Some(ContactResponse::failed("nope")))
            .then_reply(200, None),
    );
    let mut controller = controller(client);

    assert!(matches!(controller.submit(values()).await, SubmitOutcome::Failed));
    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert!(matches!(controller.submit(values()).await, SubmitOutcome::Failed));
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_alerts() {
    let client = Arc::new(ScriptedClient::new().then_unreachable());
    let mut controller = controller(client);

    assert!(matches!(controller.submit(values()).await, SubmitOutcome::Failed));
    assert_eq!(view_of(&controller).alerts.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_restores_button() {
    let client = Arc::new(ScriptedClient::new().then_sent());
    let mut controller = controller(client);

    controller.submit(values()).await;
    let view = controller.view();
    assert!(view.lock().unwrap().button.disabled);

    drop(controller);
    let view = view.lock().unwrap();
    assert!(!view.button.disabled);
    assert_eq!(view.button.label, MemoryView::SUBMIT_LABEL);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_submit_restores_button() {
    let mut controller = FormController::new(MemoryView::new(), HangingClient);

    let cancelled =
        tokio::time::timeout(Duration::from_millis(100), controller.submit(values())).await;
    assert!(cancelled.is_err());

    let view = view_of(&controller);
    assert!(!view.button.disabled);
    assert_eq!(view.button.label, MemoryView::SUBMIT_LABEL);
    assert!(view.button_history.iter().any(|b| b.label == SENDING_LABEL));
    assert!(!controller.restore_pending());

    // The next attempt is not locked out
    let retried =
        tokio::time::timeout(Duration::from_millis(100), controller.submit(values())).await;
    assert!(retried.is_err());
    assert!(!view_of(&controller).button.disabled);
}

#[tokio::test]
async fn test_service_change_toggles_detail() {
    let controller = controller(Arc::new(ScriptedClient::new()));

    controller.on_service_change("Other");
    assert!(view_of(&controller).detail_visible);

    {
        let view = controller.view();
        let mut view = view.lock().unwrap();
        view.detail_value = "Solar pump".into();
        view.errors
            .insert(FormField::OtherDetail, OTHER_DETAIL_MESSAGE.to_string());
    }

    controller.on_service_change("Electrical");
    let view = view_of(&controller);
    assert!(!view.detail_visible);
    assert!(view.detail_value.is_empty());
    assert!(view.error(FormField::OtherDetail).is_none());
}

#[tokio::test]
async fn test_field_input_clears_only_that_annotation() {
    let client = Arc::new(ScriptedClient::new());
    let mut controller = controller(client);

    controller
        .submit(FormValues {
            name: "Al".into(),
            email: "nope".into(),
            ..values()
        })
        .await;

    controller.on_field_input(FormField::Name);
    controller.on_field_input(FormField::Phone);

    let view = view_of(&controller);
    assert!(view.error(FormField::Name).is_none());
    assert!(view.error(FormField::Email).is_some());
}

#[tokio::test]
async fn test_http_client_posts_json() {
    use httpmock::prelude::*;

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/send-email")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "name": "John Doe",
                    "phone": "0712345678",
                    "email": "john@x.com",
                    "service": "Plumbing",
                    "message": "",
                    "otherDetail": ""
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"success": true, "message": "Email sent successfully!"}));
        })
        .await;

    let client = HttpSubmitClient::new(&server.base_url());
    let reply = client
        .submit(&HireRequest {
            name: "John Doe".into(),
            phone: "0712345678".into(),
            email: "john@x.com".into(),
            service: "Plumbing".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(reply.is_success());
}

#[tokio::test]
async fn test_http_client_undecodable_body() {
    use httpmock::prelude::*;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/send-email");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let reply = HttpSubmitClient::new(&server.base_url())
        .submit(&HireRequest::default())
        .await
        .unwrap();

    assert_eq!(reply.status, 502);
    assert!(reply.body.is_none());
    assert!(!reply.is_success());
}

#[tokio::test]
async fn test_form_to_server_round_trip() {
    let mock = Arc::new(MockDispatcher::succeeding());
    let config = ConfigBuilder::new()
        .with_credentials("relay@example.com", "app-password")
        .with_recipient("office@example.com")
        .with_static_dir("does-not-exist")
        .build()
        .unwrap();
    let router = App::new(AppContext::new(config, mock.clone())).into_router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = HttpSubmitClient::new(&format!("http://{}", addr));
    let mut controller = FormController::new(MemoryView::new(), client)
        .with_restore_delay(Duration::from_millis(10));

    let outcome = controller
        .submit(FormValues {
            service: "Other".into(),
            other_detail: " Borehole pump ".into(),
            ..values()
        })
        .await;

    assert!(matches!(outcome, SubmitOutcome::Sent));
    let (_, email) = mock.last_call().unwrap();
    assert_eq!(email.reply_to.as_deref(), Some("john@x.com"));
    assert!(email.html.contains("<p><strong>Specific Details:</strong> Borehole pump</p>"));
}
