// Form validation for reader submissions
// Every form is checked here before anything is sent upstream.

pub mod email;
pub mod forms;

pub use email::{email_domain, is_valid_email};
pub use forms::{CommentForm, ContactForm, NewsletterForm, RatingForm};

use serde::Serialize;

/// A problem with one submitted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Message for the given field, if it failed
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// All messages joined for a single-line response body
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Required text field with an optional minimum length (in chars, after trim)
    fn require(&mut self, field: &'static str, label: &str, value: &str, min_len: usize) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.error(field, format!("{} is required", label));
        } else if trimmed.chars().count() < min_len {
            self.error(
                field,
                format!("{} must be at least {} characters", label, min_len),
            );
        }
    }

    fn require_email(&mut self, field: &'static str, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.error(field, "Email is required");
        } else if !is_valid_email(trimmed) {
            self.error(field, "Invalid email address");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_and_summary() {
        let mut report = ValidationReport::default();
        report.require("firstName", "First Name", "  ", 2);
        report.require("lastName", "Last Name", "B", 2);
        report.require("message", "Message", "long enough text", 10);

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.message_for("firstName"), Some("First Name is required"));
        assert_eq!(
            report.summary(),
            "First Name is required; Last Name must be at least 2 characters"
        );
    }

    #[test]
    fn test_min_length_counts_chars_not_bytes() {
        let mut report = ValidationReport::default();
        report.require("lastName", "Last Name", "Æö", 2);
        assert!(report.is_valid());
    }

    #[test]
    fn test_require_email() {
        let mut report = ValidationReport::default();
        report.require_email("email", "");
        report.require_email("other", "nope");
        report.require_email("fine", " user@example.com ");
        assert_eq!(report.message_for("email"), Some("Email is required"));
        assert_eq!(report.message_for("other"), Some("Invalid email address"));
        assert_eq!(report.message_for("fine"), None);
    }
}
