use once_cell::sync::Lazy;
use regex::Regex;

pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const VALID_EMAIL_REQUIRED: &str = "Valid email is required.";
pub const INDUSTRY_REQUIRED: &str = "Industry is required.";
pub const MESSAGE_REQUIRED: &str = "Project details are required.";
pub const SERVICE_REQUIRED: &str = "Please select at least one service.";
pub const CONSENT_REQUIRED: &str = "Please agree to be contacted.";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// One contact inquiry as posted by the contact form. Every value is trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub industry: String,
    pub budget: String,
    pub message: String,
    pub services: Vec<String>,
    pub privacy: bool,
}

impl ContactSubmission {
    /// Collects posted `(name, value)` pairs. Scalar fields keep the last value
    /// seen, `services` accumulates, `privacy` only needs to be present.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut submission = Self::default();
        for (name, value) in fields {
            let value = value.trim().to_string();
            match name.as_str() {
                "firstName" => submission.first_name = value,
                "lastName" => submission.last_name = value,
                "email" => submission.email = value,
                "company" => submission.company = value,
                "industry" => submission.industry = value,
                "budget" => submission.budget = value,
                "message" => submission.message = value,
                "services" | "services[]" => {
                    if !value.is_empty() {
                        submission.services.push(value);
                    }
                }
                "privacy" => submission.privacy = true,
                _ => {}
            }
        }
        submission
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Every failed rule, in form order. An empty list means the inquiry can be sent.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.first_name.is_empty() {
            errors.push(FIRST_NAME_REQUIRED.to_string());
        }
        if self.last_name.is_empty() {
            errors.push(LAST_NAME_REQUIRED.to_string());
        }
        if self.email.is_empty() || !is_valid_email(&self.email) {
            errors.push(VALID_EMAIL_REQUIRED.to_string());
        }
        if self.industry.is_empty() {
            errors.push(INDUSTRY_REQUIRED.to_string());
        }
        if self.message.is_empty() {
            errors.push(MESSAGE_REQUIRED.to_string());
        }
        if self.services.is_empty() {
            errors.push(SERVICE_REQUIRED.to_string());
        }
        if !self.privacy {
            errors.push(CONSENT_REQUIRED.to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn complete() -> Vec<(String, String)> {
        pairs(&[
            ("firstName", "Jane"),
            ("lastName", "Doe"),
            ("email", "jane@x.com"),
            ("industry", "gaming"),
            ("message", "Hi"),
            ("services", "ppc"),
            ("privacy", "on"),
        ])
    }

    #[test]
    fn test_collects_and_trims_fields() {
        let submission = ContactSubmission::from_fields(pairs(&[
            ("firstName", "  Jane "),
            ("services", "ppc"),
            ("services[]", " seo "),
            ("services", "   "),
            ("privacy", ""),
            ("unexpected", "ignored"),
        ]));
        assert_eq!(submission.first_name, "Jane");
        assert_eq!(submission.services, vec!["ppc".to_string(), "seo".to_string()]);
        assert!(submission.privacy);
    }

    #[test]
    fn test_complete_submission_is_valid() {
        assert!(ContactSubmission::from_fields(complete()).validate().is_empty());
    }

    #[test]
    fn test_empty_submission_reports_every_rule() {
        let errors = ContactSubmission::default().validate();
        assert_eq!(
            errors,
            vec![
                FIRST_NAME_REQUIRED,
                LAST_NAME_REQUIRED,
                VALID_EMAIL_REQUIRED,
                INDUSTRY_REQUIRED,
                MESSAGE_REQUIRED,
                SERVICE_REQUIRED,
                CONSENT_REQUIRED,
            ]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut fields = complete();
        fields.push(("lastName".to_string(), "   ".to_string()));
        let errors = ContactSubmission::from_fields(fields).validate();
        assert_eq!(errors, vec![LAST_NAME_REQUIRED]);
    }

    #[test]
    fn test_email_pattern() {
        assert!(!is_valid_email("a@b"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@c.de"));
        assert!(!is_valid_email("a@@c.de"));
    }

    #[test]
    fn test_missing_privacy_only_reports_consent() {
        let fields: Vec<_> = complete().into_iter().filter(|(k, _)| k != "privacy").collect();
        let errors = ContactSubmission::from_fields(fields).validate();
        assert_eq!(errors, vec![CONSENT_REQUIRED]);
    }
}
