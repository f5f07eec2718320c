use chrono::{DateTime, Utc};

use crate::models::contact_models::ContactSubmission;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn or_not_specified(value: &str) -> &str {
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Plain-text mail body for an inquiry. The frontend builds the same text when
/// the server reply carries no preview, so the layout must not drift.
pub fn render_inquiry_body(submission: &ContactSubmission, timestamp: &str) -> String {
    let services = if submission.services.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        submission.services.join(", ")
    };

    let mut body = String::from("New Campaign Inquiry - OOTB Media\n\n");
    body.push_str("Contact Information:\n");
    body.push_str(&format!("Name: {}\n", submission.full_name()));
    body.push_str(&format!("Email: {}\n", submission.email));
    body.push_str(&format!("Company: {}\n\n", or_not_specified(&submission.company)));
    body.push_str("Project Details:\n");
    body.push_str(&format!("Industry: {}\n", submission.industry));
    body.push_str(&format!("Monthly Budget: {}\n", or_not_specified(&submission.budget)));
    body.push_str(&format!("Services Interested In: {}\n\n", services));
    body.push_str(&format!("Message:\n{}\n\n", submission.message));
    body.push_str("---\n");
    body.push_str("This inquiry was submitted through the OOTB Media website contact form.\n");
    body.push_str(&format!("Timestamp: {}\n", timestamp));
    body
}
