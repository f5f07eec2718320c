use chrono::{DateTime, Utc};

use super::fields::ContactFields;

const NOT_SPECIFIED: &str = "Not specified";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn or_not_specified(value: &str) -> &str {
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Same text the relay mails out. Used when a successful reply carries no
/// preview of its own.
pub fn synthesize_preview(fields: &ContactFields, timestamp: &str) -> String {
    let services = if fields.services.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        fields.services.join(", ")
    };

    format!(
        "New Campaign Inquiry - OOTB Media\n\
         \n\
         Contact Information:\n\
         Name: {first} {last}\n\
         Email: {email}\n\
         Company: {company}\n\
         \n\
         Project Details:\n\
         Industry: {industry}\n\
         Monthly Budget: {budget}\n\
         Services Interested In: {services}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         This inquiry was submitted through the OOTB Media website contact form.\n\
         Timestamp: {timestamp}\n",
        first = fields.first_name,
        last = fields.last_name,
        email = fields.email,
        company = or_not_specified(&fields.company),
        industry = fields.industry,
        budget = or_not_specified(&fields.budget),
        services = services,
        message = fields.message,
        timestamp = timestamp,
    )
}
