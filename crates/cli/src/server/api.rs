use super::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use press_kit_client::PostQuery;
use press_kit_core::{Comment, Error, Post};
use press_kit_generator::email::{self, ContactMessage};
use press_kit_generator::render::comment_html;
use press_kit_validator::forms::{CommentForm, ContactForm, NewsletterForm, RatingForm};
use press_kit_validator::{FieldError, ValidationReport};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Results returned by the live search box
const SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
struct CommentBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchBody {
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    term: String,
}

fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (
        status,
        Json(MessageBody {
            message: text.into(),
            errors: Vec::new(),
        }),
    )
        .into_response()
}

fn invalid(report: ValidationReport) -> Response {
    let body = MessageBody {
        message: report.summary(),
        errors: report.errors,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn bad_body(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected request body");
    message(StatusCode::BAD_REQUEST, "Invalid request body")
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchBody> {
    let term = params.term.trim();
    if term.is_empty() {
        return Json(SearchBody { posts: Vec::new() });
    }
    let posts = state
        .source
        .posts(&PostQuery::search(term).per_page(SEARCH_LIMIT))
        .await;
    Json(SearchBody { posts })
}

pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => return bad_body(rejection),
    };
    let report = form.validate();
    if !report.is_valid() {
        return invalid(report);
    }

    let site = &state.config.site;
    let msg = ContactMessage {
        first_name: &form.first_name,
        last_name: &form.last_name,
        email: &form.email,
        message: &form.message,
    };
    let mails = [
        email::contact_admin(&site.name, &state.config.smtp.recipient, &msg),
        email::contact_confirmation(&site.name, &msg),
    ];
    for mail in mails {
        if let Err(e) = state.mailer.send(mail).await {
            error!(error = %e, "Error processing contact form");
            return message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message");
        }
    }

    info!(from = %form.full_name(), "contact form sent");
    message(StatusCode::OK, "Message sent successfully!")
}

pub async fn newsletter(
    State(state): State<AppState>,
    payload: Result<Json<NewsletterForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => return bad_body(rejection),
    };
    let report = form.validate(&state.config.newsletter.accepted_domains);
    if !report.is_valid() {
        return invalid(report);
    }

    let mails = [
        email::newsletter_welcome(&state.config.site.name, &form.email),
        email::newsletter_admin(&state.config.smtp.recipient, &form.email),
    ];
    for mail in mails {
        if let Err(e) = state.mailer.send(mail).await {
            error!(error = %e, "Error processing newsletter subscription");
            return message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process subscription");
        }
    }

    info!("newsletter subscription");
    message(StatusCode::OK, "Subscription successful")
}

pub async fn comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => return bad_body(rejection),
    };
    let report = form.validate();
    if !report.is_valid() {
        return invalid(report);
    }

    let is_reply = form.is_reply();
    match state.source.create_comment(&form.into_new_comment()).await {
        Ok(created) => {
            let text = if is_reply {
                "Reply submitted successfully"
            } else {
                "Comment submitted successfully"
            };
            let body = CommentBody {
                message: text.to_string(),
                html: Some(comment_html(&created)),
                comment: Some(created),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(Error::Rejected(reason)) => {
            warn!(reason = %reason, "comment rejected");
            message(StatusCode::BAD_REQUEST, reason)
        }
        Err(e) => {
            error!(error = %e, "Error submitting comment");
            message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to submit comment")
        }
    }
}

pub async fn rating(
    State(state): State<AppState>,
    payload: Result<Json<RatingForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => return bad_body(rejection),
    };
    let report = form.validate();
    if !report.is_valid() {
        return invalid(report);
    }
    let Some(submission) = form.into_submission() else {
        return message(StatusCode::BAD_REQUEST, "Post ID and rating are required.");
    };

    match state.source.save_rating(&submission).await {
        Ok(()) => message(StatusCode::OK, "Rating submitted successfully!"),
        Err(e) => {
            error!(error = %e, post = submission.post_id, "Error saving rating");
            message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to submit rating")
        }
    }
}
