//! In-memory stand-ins for the mail transport, the form view and the
//! submission client.

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use crate::form::{ButtonState, ClientError, FormField, FormView, SubmitClient, SubmitReply};
use crate::http::ContactResponse;
use crate::submission::HireRequest;
use crate::traits::mailer::{
    Credentials, DeliveryReceipt, DispatchError, MailDispatcher, OutgoingEmail,
};

/// Dispatcher that records every call and answers with a fixed outcome
pub struct MockDispatcher {
    outcome: Result<DeliveryReceipt, DispatchError>,
    healthy: bool,
    calls: Mutex<Vec<(Credentials, OutgoingEmail)>>,
}

impl MockDispatcher {
    pub fn succeeding() -> Self {
        Self::with_outcome(Ok(DeliveryReceipt::new("250 2.0.0 OK queued")))
    }

    pub fn failing(error: DispatchError) -> Self {
        Self::with_outcome(Err(error))
    }

    pub fn with_outcome(outcome: Result<DeliveryReceipt, DispatchError>) -> Self {
        Self {
            outcome,
            healthy: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report the transport as unusable
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn calls(&self) -> Vec<(Credentials, OutgoingEmail)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_call(&self) -> Option<(Credentials, OutgoingEmail)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl MailDispatcher for MockDispatcher {
    async fn dispatch(
        &self,
        credentials: &Credentials,
        email: &OutgoingEmail,
    ) -> Result<DeliveryReceipt, DispatchError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((credentials.clone(), email.clone()));
        email.validate()?;
        self.outcome.clone()
    }

    fn is_healthy(&self) -> bool {
        self.healthy
    }
}

/// Form view backed by plain fields, recording what the controller did
#[derive(Debug, Clone)]
pub struct MemoryView {
    pub errors: BTreeMap<FormField, String>,
    pub detail_visible: bool,
    pub detail_value: String,
    pub resets: usize,
    pub alerts: Vec<String>,
    pub button: ButtonState,
    /// Every button state set, oldest first
    pub button_history: Vec<ButtonState>,
}

impl MemoryView {
    pub const SUBMIT_LABEL: &'static str = "Send Request";

    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
            detail_visible: false,
            detail_value: String::new(),
            resets: 0,
            alerts: Vec::new(),
            button: ButtonState::idle(Self::SUBMIT_LABEL),
            button_history: Vec::new(),
        }
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl FormView for MemoryView {
    fn show_error(&mut self, field: FormField, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    fn clear_error(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    fn has_error(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    fn set_detail_visible(&mut self, visible: bool) {
        self.detail_visible = visible;
    }

    fn clear_detail(&mut self) {
        self.detail_value.clear();
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.detail_value.clear();
    }

    fn button(&self) -> ButtonState {
        self.button.clone()
    }

    fn set_button(&mut self, state: ButtonState) {
        self.button_history.push(state.clone());
        self.button = state;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Submission client answering from a script, one entry per call
///
/// Once the script runs out every call fails as unreachable.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<SubmitReply, ClientError>>>,
    requests: Mutex<Vec<HireRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_reply(self, status: u16, body: Option<ContactResponse>) -> Self {
        self.push(Ok(SubmitReply::new(status, body)))
    }

    /// 200 with the success body
    pub fn then_sent(self) -> Self {
        self.then_reply(200, Some(ContactResponse::sent()))
    }

    pub fn then_unreachable(self) -> Self {
        self.push(Err(ClientError::Unreachable("connection refused".into())))
    }

    fn push(self, reply: Result<SubmitReply, ClientError>) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HireRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SubmitClient for ScriptedClient {
    async fn submit(&self, request: &HireRequest) -> Result<SubmitReply, ClientError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Unreachable("no scripted reply".into())))
    }
}
