use crate::{ValidationReport, email_domain};
use press_kit_core::text::strip_html_tags;
use press_kit_core::{NewComment, RatingSubmission};
use serde::Deserialize;

/// Contact form body: `{firstName, lastName, email, message}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.require("firstName", "First Name", &self.first_name, 2);
        report.require("lastName", "Last Name", &self.last_name, 2);
        report.require_email("email", &self.email);
        report.require("message", "Message", &self.message, 10);
        report
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Newsletter signup body: `{email}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsletterForm {
    pub email: String,
}

impl NewsletterForm {
    /// Format check plus the accepted-domain allow list
    pub fn validate(&self, accepted_domains: &[String]) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.require_email("email", &self.email);
        if report.is_valid() {
            let accepted = email_domain(&self.email).is_some_and(|domain| {
                accepted_domains
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(&domain))
            });
            if !accepted {
                report.error("email", "Email domain not accepted");
            }
        }
        report
    }
}

/// Comment or reply body.
///
/// Accepts both the API field names (`author_name`, `author_email`) and the
/// short form names (`author`, `email`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub post: u64,
    /// 0 for a top-level comment
    pub parent: u64,
    #[serde(alias = "author")]
    pub author_name: String,
    #[serde(alias = "email")]
    pub author_email: String,
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.post == 0 {
            report.error("post", "Post ID is required");
        }
        report.require("author_name", "Name", &self.author_name, 1);
        report.require_email("author_email", &self.author_email);
        let label = if self.parent == 0 { "Comment" } else { "Reply" };
        report.require("content", label, &self.content, 1);
        report
    }

    pub fn is_reply(&self) -> bool {
        self.parent != 0
    }

    pub fn into_new_comment(self) -> NewComment {
        NewComment {
            post: self.post,
            parent: self.parent,
            author_name: self.author_name.trim().to_string(),
            author_email: self.author_email.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

/// Rating body: `{postId, rating, reviewText}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingForm {
    pub post_id: Option<u64>,
    pub rating: Option<i64>,
    pub review_text: String,
}

impl RatingForm {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        match (self.post_id, self.rating) {
            (Some(id), Some(_)) if id > 0 => {}
            _ => report.error("postId", "Post ID and rating are required."),
        }
        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            report.error("rating", "Rating must be between 1 and 5");
        }
        if strip_html_tags(&self.review_text).is_empty() {
            report.error("reviewText", "Please enter your feedback!");
        }
        report
    }

    /// Upstream body with markup removed from the review.
    ///
    /// Returns `None` unless the form validates.
    pub fn into_submission(self) -> Option<RatingSubmission> {
        if !self.validate().is_valid() {
            return None;
        }
        let rating = u8::try_from(self.rating?).ok()?;
        Some(RatingSubmission {
            post_id: self.post_id?,
            rating,
            review_text: strip_html_tags(&self.review_text),
        })
    }
}
