//! Headless form controller.
//!
//! Owns the submit lifecycle: validation, the single POST, button state and
//! the delayed restoration of the button after every attempt.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::client::SubmitClient;
use super::fields::{FormField, FormValues};
use super::timer::RestoreTimer;
use super::validation::{FieldErrors, VALIDATED_FIELDS, validate_form};
use super::view::{ButtonState, FormView};
use crate::submission::OTHER_SERVICE;

pub const ALERT_MESSAGE: &str = "Error sending email: Check console or server connection.";

/// Delay before the submit button returns to its original state
pub const RESTORE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// A submission is in flight or its button restoration is pending
    Busy,
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    Sent,
    Failed,
}

pub struct FormController<V, C> {
    view: Arc<Mutex<V>>,
    client: C,
    restore_delay: Duration,
    timer: Option<RestoreTimer>,
}

impl<V, C> FormController<V, C>
where
    V: FormView + 'static,
    C: SubmitClient,
{
    pub fn new(view: V, client: C) -> Self {
        Self {
            view: Arc::new(Mutex::new(view)),
            client,
            restore_delay: RESTORE_DELAY,
            timer: None,
        }
    }

    pub fn with_restore_delay(mut self, delay: Duration) -> Self {
        self.restore_delay = delay;
        self
    }

    /// Shared handle to the view
    pub fn view(&self) -> Arc<Mutex<V>> {
        self.view.clone()
    }

    pub fn restore_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(RestoreTimer::is_pending)
    }

    fn lock(&self) -> MutexGuard<'_, V> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The service select changed
    pub fn on_service_change(&self, service: &str) {
        let mut view = self.lock();
        if service == OTHER_SERVICE {
            view.set_detail_visible(true);
        } else {
            view.set_detail_visible(false);
            view.clear_detail();
            view.clear_error(FormField::OtherDetail);
        }
    }

    /// A field was edited; an existing annotation on it goes away
    pub fn on_field_input(&self, field: FormField) {
        let mut view = self.lock();
        if view.has_error(field) {
            view.clear_error(field);
        }
    }

    pub async fn submit(&mut self, values: FormValues) -> SubmitOutcome {
        let values = values.trimmed();
        let in_flight = {
            let mut view = self.lock();
            let button = view.button();
            if button.disabled {
                return SubmitOutcome::Busy;
            }

            let result = validate_form(&values);
            let empty = FieldErrors::new();
            let errors = result.as_ref().err().unwrap_or(&empty);
            for field in VALIDATED_FIELDS {
                match errors.message(field) {
                    Some(message) => view.show_error(field, message),
                    None => view.clear_error(field),
                }
            }
            if let Err(errors) = result {
                return SubmitOutcome::Invalid(errors);
            }

            view.set_button(ButtonState::sending());
            InFlight {
                view: self.view.clone(),
                label: Some(button.label),
            }
        };

        let request = values.into_request();
        let outcome = match self.client.submit(&request).await {
            Ok(reply) if reply.is_success() => {
                let mut view = self.lock();
                view.reset();
                view.set_detail_visible(false);
                view.set_button(ButtonState::sent());
                SubmitOutcome::Sent
            }
            result => {
                match result {
                    Ok(reply) => tracing::error!(
                        status = reply.status,
                        reply = reply.body.as_ref().map_or("Failed to send", |b| b.message.as_str()),
                        "Email error"
                    ),
                    Err(e) => tracing::error!(error = %e, "Email error"),
                }
                let mut view = self.lock();
                view.set_button(ButtonState::failed());
                view.alert(ALERT_MESSAGE);
                SubmitOutcome::Failed
            }
        };

        self.timer = Some(in_flight.settle(self.restore_delay));

        outcome
    }
}

/// The sending state of one submission.
///
/// Dropped without [`InFlight::settle`] (the `submit` future was cancelled
/// mid-request) it restores the idle button at once.
struct InFlight<V: FormView> {
    view: Arc<Mutex<V>>,
    label: Option<String>,
}

impl<V: FormView + 'static> InFlight<V> {
    /// Hand the restoration over to a timer firing after `delay`
    fn settle(mut self, delay: Duration) -> RestoreTimer {
        let view = self.view.clone();
        let label = self.label.take().unwrap_or_default();
        RestoreTimer::arm(delay, move || restore_idle(&view, label))
    }
}

impl<V: FormView> Drop for InFlight<V> {
    fn drop(&mut self) {
        if let Some(label) = self.label.take() {
            tracing::debug!("Submission abandoned mid-request, restoring button");
            restore_idle(&self.view, label);
        }
    }
}

fn restore_idle<V: FormView>(view: &Arc<Mutex<V>>, label: String) {
    view.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .set_button(ButtonState::idle(label));
}
