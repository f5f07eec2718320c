//! Contact form fields and the checks run before anything is sent.
//!
//! The relay repeats these checks with the same messages, so a visitor who
//! bypasses the page script sees the same wording in the server reply.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Industry,
    Message,
    Services,
    Privacy,
}

impl Field {
    /// Required text inputs, in form order.
    pub const REQUIRED: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Industry,
        Field::Message,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Industry => "industry",
            Field::Message => "message",
            Field::Services => "services",
            Field::Privacy => "privacy",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Field::FirstName => "First name is required.",
            Field::LastName => "Last name is required.",
            Field::Email => "Valid email is required.",
            Field::Industry => "Industry is required.",
            Field::Message => "Project details are required.",
            Field::Services => "Please select at least one service.",
            Field::Privacy => "Please agree to be contacted.",
        }
    }
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFields {
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

impl ContactFields {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields = Self::default();
        for (name, value) in pairs {
            let value = value.trim().to_string();
            match name.as_str() {
                "firstName" => fields.first_name = value,
                "lastName" => fields.last_name = value,
                "email" => fields.email = value,
                "company" => fields.company = value,
                "industry" => fields.industry = value,
                "budget" => fields.budget = value,
                "message" => fields.message = value,
                "services" => {
                    if !value.is_empty() {
                        fields.services.push(value);
                    }
                }
                "privacy" => fields.privacy = true,
                _ => {}
            }
        }
        fields
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Industry => &self.industry,
            Field::Message => &self.message,
            Field::Services | Field::Privacy => "",
        }
    }

    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();
        for field in Field::REQUIRED {
            let value = self.text(field);
            let failed = value.is_empty() || (field == Field::Email && !is_valid_email(value));
            if failed {
                issues.push(field);
            }
        }
        if self.services.is_empty() {
            issues.push(Field::Services);
        }
        if !self.privacy {
            issues.push(Field::Privacy);
        }
        ValidationReport { issues }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid,
}

impl FieldState {
    pub fn class(self) -> &'static str {
        match self {
            FieldState::Valid => "is-valid",
            FieldState::Invalid => "is-invalid",
        }
    }
}

/// Failed fields of one validation pass, in form order. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<Field>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_issue(&self, field: Field) -> bool {
        self.issues.contains(&field)
    }

    pub fn issues(&self) -> &[Field] {
        &self.issues
    }

    pub fn state_of(&self, field: Field) -> FieldState {
        if self.has_issue(field) {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.issues.iter().map(|f| f.message()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> ContactFields {
        ContactFields {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            industry: "gaming".to_string(),
            message: "Hi".to_string(),
            services: vec!["ppc".to_string()],
            privacy: true,
            ..Default::default()
        }
    }

    #[test]
    fn email_needs_dotted_domain() {
        assert!(!is_valid_email("a@b"));
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
        assert!(!is_valid_email("@c.de"));
        assert!(is_valid_email("a@b..co"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(jane().validate().is_valid());
    }

    #[test]
    fn empty_form_counts_every_rule_once() {
        let report = ContactFields::default().validate();
        let field_errors = report
            .issues()
            .iter()
            .filter(|f| Field::REQUIRED.contains(f))
            .count();
        assert_eq!(field_errors, 5);
        assert!(report.has_issue(Field::Services));
        assert!(report.has_issue(Field::Privacy));
        assert_eq!(report.issues().len(), 7);
    }

    #[test]
    fn bad_email_is_a_single_issue() {
        let mut fields = jane();
        fields.email = "a@b".to_string();
        let report = fields.validate();
        assert_eq!(report.issues(), &[Field::Email]);
        assert_eq!(report.state_of(Field::Email), FieldState::Invalid);
        assert_eq!(report.state_of(Field::FirstName), FieldState::Valid);
    }

    #[test]
    fn services_and_privacy_are_separate_issues() {
        let mut fields = jane();
        fields.services.clear();
        fields.privacy = false;
        assert_eq!(
            fields.validate().messages(),
            vec!["Please select at least one service.", "Please agree to be contacted."]
        );
    }

    #[test]
    fn pairs_are_trimmed_and_services_repeat() {
        let fields = ContactFields::from_pairs(vec![
            ("firstName".to_string(), "  Jane ".to_string()),
            ("services".to_string(), "ppc".to_string()),
            ("services".to_string(), "social".to_string()),
            ("privacy".to_string(), "on".to_string()),
        ]);
        assert_eq!(fields.first_name, "Jane");
        assert_eq!(fields.services, vec!["ppc", "social"]);
        assert!(fields.privacy);
    }

    #[test]
    fn whitespace_only_is_empty() {
        let fields = ContactFields::from_pairs(vec![("message".to_string(), "   ".to_string())]);
        assert!(fields.validate().has_issue(Field::Message));
    }
}
