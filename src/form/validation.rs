//! Client-side field rules.
//!
//! Each rule reports a `validator::ValidationError` carrying the message
//! shown next to the field.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use super::fields::{FormField, FormValues};

pub const NAME_MESSAGE: &str = "Name must be at least 3 characters.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const PHONE_DIGITS_MESSAGE: &str = "Phone number must be at least 10 digits.";
pub const PHONE_FORMAT_MESSAGE: &str = "Please enter a valid phone number.";
pub const OTHER_DETAIL_MESSAGE: &str = "Please describe the service you need.";

/// Fields that carry validation rules, in display order
pub const VALIDATED_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Email,
    FormField::Phone,
    FormField::OtherDetail,
];

const MIN_NAME_CHARS: usize = 3;
const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid Regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s]{10,15}$").expect("Invalid Regex"));

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(field_error("name_length", NAME_MESSAGE));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(email) {
        return Err(field_error("email", EMAIL_MESSAGE));
    }
    Ok(())
}

/// Digit count is checked before the pattern, so a short number always
/// gets the digit message.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(field_error("phone_digits", PHONE_DIGITS_MESSAGE));
    }
    if !PHONE_RE.is_match(phone) {
        return Err(field_error("phone_format", PHONE_FORMAT_MESSAGE));
    }
    Ok(())
}

/// Required only for the "Other" service
pub fn validate_other_detail(values: &FormValues) -> Result<(), ValidationError> {
    if values.is_other_service() && values.other_detail.trim().is_empty() {
        return Err(field_error("other_detail_required", OTHER_DETAIL_MESSAGE));
    }
    Ok(())
}

/// Validation failures keyed by field
#[derive(Debug, Clone, Default)]
pub struct FieldErrors(BTreeMap<FormField, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, error: ValidationError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    /// Message shown next to `field`, if it failed
    pub fn message(&self, field: FormField) -> Option<&str> {
        self.get(field).and_then(|err| err.message.as_deref())
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

/// Run every rule; one failure does not stop the others.
///
/// `values` are expected to be trimmed already.
pub fn validate_form(values: &FormValues) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let results = [
        (FormField::Name, validate_name(&values.name)),
        (FormField::Email, validate_email(&values.email)),
        (FormField::Phone, validate_phone(&values.phone)),
        (FormField::OtherDetail, validate_other_detail(values)),
    ];
    for (field, result) in results {
        if let Err(err) = result {
            errors.insert(field, err);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> FormValues {
        FormValues {
            name: "John Doe".into(),
            phone: "0712345678".into(),
            email: "john@x.com".into(),
            service: "Plumbing".into(),
            message: String::new(),
            other_detail: String::new(),
        }
    }

    #[test]
    fn test_name_minimum_length() {
        assert!(validate_name("Al").is_err());
        assert!(validate_name("Ali").is_ok());
        assert!(validate_name("Zoë").is_ok());
    }

    #[test]
    fn test_email_pattern() {
        assert!(validate_email("john@x.com").is_ok());
        assert!(validate_email("john@x").is_err());
        assert!(validate_email("john doe@x.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_phone_digit_count_checked_first() {
        let err = validate_phone("071234567").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(PHONE_DIGITS_MESSAGE));

        // Enough digits but letters break the pattern
        let err = validate_phone("0712345678x").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(PHONE_FORMAT_MESSAGE));
    }

    #[test]
    fn test_phone_accepts_separators() {
        assert!(validate_phone("+254712345678").is_ok());
        assert!(validate_phone("0712 345 678").is_ok());
        assert!(validate_phone("0712-345-678").is_ok());
        assert!(validate_phone("0712345678").is_ok());
    }

    #[test]
    fn test_phone_length_bounds() {
        // 15 characters, 11 digits
        assert!(validate_phone("+254 712 345 67").is_ok());

        // 16 characters fails on length despite having enough digits
        let err = validate_phone("+254 712 345 678").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(PHONE_FORMAT_MESSAGE));

        let err = validate_phone("+254 712 345 6789").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(PHONE_FORMAT_MESSAGE));
    }

    #[test]
    fn test_other_detail_required_only_for_other() {
        let mut values = valid_values();
        assert!(validate_other_detail(&values).is_ok());

        values.service = "Other".into();
        let err = validate_other_detail(&values).unwrap_err();
        assert_eq!(err.message.as_deref(), Some(OTHER_DETAIL_MESSAGE));

        values.other_detail = "Solar pump".into();
        assert!(validate_other_detail(&values).is_ok());
    }

    #[test]
    fn test_validate_form_reports_every_failure() {
        let values = FormValues {
            name: "Al".into(),
            phone: "123".into(),
            email: "nope".into(),
            service: "Other".into(),
            message: String::new(),
            other_detail: String::new(),
        };
        let errors = validate_form(&values).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.message(FormField::Name), Some(NAME_MESSAGE));
        assert_eq!(errors.message(FormField::Email), Some(EMAIL_MESSAGE));
        assert_eq!(errors.message(FormField::Phone), Some(PHONE_DIGITS_MESSAGE));
        assert_eq!(errors.message(FormField::OtherDetail), Some(OTHER_DETAIL_MESSAGE));
    }

    #[test]
    fn test_validate_form_accepts_valid_values() {
        assert!(validate_form(&valid_values()).is_ok());
    }
}
