use std::fmt;

use lettre::Address;
use serde::Serialize;
use serde_json::{Map, Value};

/// A contact-form submission that passed validation. All fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Address,
    pub service: String,
    pub message: String,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    InvalidType,
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub reason: IssueKind,
}

/// Every offending field of a rejected payload, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields().join(", ");
        write!(f, "invalid submission fields: {}", fields)
    }
}

impl std::error::Error for ValidationFailure {}

fn is_valid_email_address(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if parts.next().is_some() {
        return false;
    }
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.contains('.')
}

fn text_field(
    payload: &Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(_) => {
            issues.push(FieldIssue {
                field,
                reason: IssueKind::InvalidType,
            });
            None
        }
    }
}

fn required_field(
    payload: &Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    let before = issues.len();
    let value = text_field(payload, field, issues);
    if value.is_none() && issues.len() == before {
        issues.push(FieldIssue {
            field,
            reason: IssueKind::Missing,
        });
    }
    value
}

/// Checks a decoded JSON body against the contact form shape.
///
/// `name`, `email`, `service` and `message` are required and must be
/// non-blank strings; `email` must also be a deliverable address.
/// `organization` is optional and a blank value counts as absent.
/// Every failing field is reported, not just the first.
pub fn validate(raw: &Value) -> Result<ContactSubmission, ValidationFailure> {
    let empty = Map::new();
    let payload = raw.as_object().unwrap_or(&empty);
    let mut issues = Vec::new();

    let name = required_field(payload, "name", &mut issues);
    let email = required_field(payload, "email", &mut issues).and_then(|raw_email| {
        let parsed = is_valid_email_address(&raw_email)
            .then(|| raw_email.parse::<Address>().ok())
            .flatten();
        if parsed.is_none() {
            issues.push(FieldIssue {
                field: "email",
                reason: IssueKind::InvalidEmail,
            });
        }
        parsed
    });
    let service = required_field(payload, "service", &mut issues);
    let message = required_field(payload, "message", &mut issues);
    let organization = text_field(payload, "organization", &mut issues);

    match (name, email, service, message) {
        (Some(name), Some(email), Some(service), Some(message)) if issues.is_empty() => {
            Ok(ContactSubmission {
                name,
                email,
                service,
                message,
                organization,
            })
        }
        _ => Err(ValidationFailure { issues }),
    }
}
