//! The hire request form, without a DOM.
//!
//! The page binds its inputs to a [`FormView`] and forwards events to a
//! [`FormController`]; the POST goes through a [`SubmitClient`].

mod client;
mod controller;
mod fields;
mod timer;
mod validation;
mod view;

pub use client::{ClientError, HttpSubmitClient, SubmitClient, SubmitReply};
pub use controller::{ALERT_MESSAGE, FormController, RESTORE_DELAY, SubmitOutcome};
pub use fields::{FormField, FormValues, ServiceCategory, UnknownService};
pub use timer::RestoreTimer;
pub use validation::{
    EMAIL_MESSAGE, FieldErrors, NAME_MESSAGE, OTHER_DETAIL_MESSAGE, PHONE_DIGITS_MESSAGE,
    PHONE_FORMAT_MESSAGE, VALIDATED_FIELDS, validate_email, validate_form, validate_name,
    validate_other_detail, validate_phone,
};
pub use view::{
    BUSY_OPACITY, ButtonState, FAILED_BACKGROUND, FAILED_LABEL, FormView, SENDING_LABEL,
    SENT_BACKGROUND, SENT_LABEL,
};
