use super::fields::FormField;

pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "Message Sent! We will get back to you soon.";
pub const FAILED_LABEL: &str = "Failed. Retry?";
pub const SENT_BACKGROUND: &str = "#10B981";
pub const FAILED_BACKGROUND: &str = "#EF4444";
pub const BUSY_OPACITY: f32 = 0.7;

/// Visible state of the submit button
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub label: String,
    /// `None` means the stylesheet default
    pub background: Option<String>,
    pub opacity: f32,
    pub disabled: bool,
}

impl ButtonState {
    /// Enabled, unstyled button with the given label
    pub fn idle(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            background: None,
            opacity: 1.0,
            disabled: false,
        }
    }

    pub fn sending() -> Self {
        Self {
            label: SENDING_LABEL.to_string(),
            background: None,
            opacity: BUSY_OPACITY,
            disabled: true,
        }
    }

    pub fn sent() -> Self {
        Self {
            label: SENT_LABEL.to_string(),
            background: Some(SENT_BACKGROUND.to_string()),
            ..Self::sending()
        }
    }

    pub fn failed() -> Self {
        Self {
            label: FAILED_LABEL.to_string(),
            background: Some(FAILED_BACKGROUND.to_string()),
            ..Self::sending()
        }
    }
}

/// What the controller needs from the rendered form
///
/// Implemented over the DOM by the page and by `testing::MemoryView` in tests.
pub trait FormView: Send {
    /// Annotate `field` with `message`
    fn show_error(&mut self, field: FormField, message: &str);

    fn clear_error(&mut self, field: FormField);

    fn has_error(&self, field: FormField) -> bool;

    /// Show and require the other-detail input, or hide and un-require it
    fn set_detail_visible(&mut self, visible: bool);

    /// Empty the other-detail input
    fn clear_detail(&mut self);

    /// Reset every input to its initial value
    fn reset(&mut self);

    fn button(&self) -> ButtonState;

    fn set_button(&mut self, state: ButtonState);

    /// Blocking user-facing alert
    fn alert(&mut self, message: &str);
}
