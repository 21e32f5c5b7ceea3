//! Rendering of the notification email sent for each hire request.
//!
//! Values are interpolated as-is; the markup is not escaped.

use super::model::HireRequest;
use crate::traits::mailer::OutgoingEmail;

/// Body text used when the submitter left the message empty
pub const NO_MESSAGE_PLACEHOLDER: &str = "No additional message provided.";

/// `Double Star Hire Request: {service}`
pub fn subject(request: &HireRequest) -> String {
    format!("Double Star Hire Request: {}", request.service)
}

pub fn html_body(request: &HireRequest) -> String {
    let details = if request.is_other_service() {
        format!(
            r#"<p><strong>Specific Details:</strong> {}</p>"#,
            request.other_detail
        )
    } else {
        String::new()
    };

    let message = if request.message.is_empty() {
        NO_MESSAGE_PLACEHOLDER
    } else {
        request.message.as_str()
    };

    format!(
        r#"
        <div style="font-family: Arial, sans-serif; padding: 20px; color: #333;">
            <h2 style="color: #0F172A;">New Hire Request from Website</h2>
            <hr>
            <p><strong>Client Name:</strong> {name}</p>
            <p><strong>Phone:</strong> {phone}</p>
            <p><strong>Email:</strong> {email}</p>
            <p><strong>Service Requested:</strong> {service}</p>
            {details}
            <p><strong>Message/Notes:</strong></p>
            <blockquote style="background: #f9f9f9; padding: 15px; border-left: 4px solid #FFD700;">
                {message}
            </blockquote>
            <hr>
            <p style="font-size: 12px; color: #666;">This email was sent from the Double Star Engineering Services contact form.</p>
        </div>
    "#,
        name = request.name,
        phone = request.phone,
        email = request.email,
        service = request.service,
        details = details,
        message = message,
    )
}

/// Sender identity of the relay account
#[derive(Debug, Clone, Copy)]
pub struct Sender<'a> {
    pub name: &'a str,
    pub account: &'a str,
}

/// Build the complete notification: the relay account sends to the office
/// and replies go straight to the submitter.
pub fn build_email(request: &HireRequest, sender: Sender<'_>, recipient: &str) -> OutgoingEmail {
    OutgoingEmail::new(sender.account, recipient, subject(request))
        .from_name(sender.name)
        .reply_to(request.email.as_str())
        .html(html_body(request))
}
