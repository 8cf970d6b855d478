//! Mail sent by the contact and newsletter forms.
//!
//! Everything the reader typed is escaped before it lands in HTML.

use crate::html::html_escape;
use chrono::Utc;
use press_kit_client::OutgoingMail;

const WRAPPER_STYLE: &str = "font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;";
const HEADING_STYLE: &str = "color: #0f766e;";
const BOX_STYLE: &str =
    "background-color: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;";

pub struct ContactMessage<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
}

impl ContactMessage<'_> {
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Notification to the site owner
pub fn contact_admin(site_name: &str, recipient: &str, msg: &ContactMessage) -> OutgoingMail {
    let name = msg.full_name();
    let html = format!(
        r#"<div style="{wrapper}">
  <h2 style="{heading}">New Contact Form Submission</h2>
  <div style="{box_style}">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Date:</strong> {date}</p>
  </div>
  <div style="padding: 20px; border-left: 4px solid #0f766e; margin: 20px 0;">
    <h3 style="{heading} margin-top: 0;">Message:</h3>
    <p style="line-height: 1.6; margin: 0;">{message}</p>
  </div>
  <p style="color: #666; font-size: 14px;">Sent from the contact form on {site}.</p>
</div>"#,
        wrapper = WRAPPER_STYLE,
        heading = HEADING_STYLE,
        box_style = BOX_STYLE,
        name = html_escape(&name),
        email = html_escape(msg.email),
        date = timestamp(),
        message = multiline(msg.message),
        site = html_escape(site_name),
    );
    let text = format!(
        "New contact form submission\n\nName: {}\nEmail: {}\n\n{}\n",
        name, msg.email, msg.message
    );

    OutgoingMail {
        to: recipient.to_string(),
        subject: format!("New Contact Form Submission from {}", name),
        html,
        text,
    }
}

/// Confirmation back to the sender
pub fn contact_confirmation(site_name: &str, msg: &ContactMessage) -> OutgoingMail {
    let html = format!(
        r#"<div style="{wrapper}">
  <h2 style="{heading}">Thank you for reaching out!</h2>
  <p>Dear {first},</p>
  <p>We have received your message and will get back to you within 24 hours.</p>
  <div style="{box_style}">
    <h3 style="{heading} margin-top: 0;">Your Message:</h3>
    <p style="line-height: 1.6; margin: 0;">{message}</p>
  </div>
  <p>Best regards,<br>The {site} Team</p>
</div>"#,
        wrapper = WRAPPER_STYLE,
        heading = HEADING_STYLE,
        box_style = BOX_STYLE,
        first = html_escape(msg.first_name.trim()),
        message = multiline(msg.message),
        site = html_escape(site_name),
    );
    let text = format!(
        "Dear {},\n\nWe have received your message and will get back to you within 24 hours.\n\nYour message:\n{}\n\nBest regards,\nThe {} Team\n",
        msg.first_name.trim(),
        msg.message,
        site_name
    );

    OutgoingMail {
        to: msg.email.trim().to_string(),
        subject: "Thank you for contacting us!".to_string(),
        html,
        text,
    }
}

pub fn newsletter_welcome(site_name: &str, subscriber: &str) -> OutgoingMail {
    let html = format!(
        r#"<div style="{wrapper}">
  <h2 style="{heading}">Welcome to Our Newsletter!</h2>
  <p>Thank you for subscribing to the {site} newsletter. You'll now receive our latest articles and reviews.</p>
  <p>Best regards,<br>The {site} Team</p>
</div>"#,
        wrapper = WRAPPER_STYLE,
        heading = HEADING_STYLE,
        site = html_escape(site_name),
    );
    let text = format!(
        "Thank you for subscribing to the {0} newsletter. You'll now receive our latest articles and reviews.\n\nBest regards,\nThe {0} Team\n",
        site_name
    );

    OutgoingMail {
        to: subscriber.trim().to_string(),
        subject: "Welcome to Our Newsletter!".to_string(),
        html,
        text,
    }
}

pub fn newsletter_admin(recipient: &str, subscriber: &str) -> OutgoingMail {
    let date = timestamp();
    let html = format!(
        r#"<div style="{wrapper}">
  <h2 style="{heading}">New Newsletter Subscription</h2>
  <p>A new reader has subscribed to your newsletter:</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Date:</strong> {date}</p>
</div>"#,
        wrapper = WRAPPER_STYLE,
        heading = HEADING_STYLE,
        email = html_escape(subscriber.trim()),
        date = date,
    );

    OutgoingMail {
        to: recipient.to_string(),
        subject: "New Newsletter Subscription".to_string(),
        html,
        text: format!("New subscriber: {}\nDate: {}\n", subscriber.trim(), date),
    }
}

fn multiline(s: &str) -> String {
    html_escape(s.trim()).replace('\n', "<br>")
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage<'static> {
        ContactMessage {
            first_name: "Ann",
            last_name: "Lee",
            email: "ann@gmail.com",
            message: "Line one\n<b>Line two</b>",
        }
    }

    #[test]
    fn test_contact_admin() {
        let mail = contact_admin("Jimowers", "owner@example.com", &message());
        assert_eq!(mail.to, "owner@example.com");
        assert_eq!(mail.subject, "New Contact Form Submission from Ann Lee");
        assert!(mail.html.contains("Line one<br>&lt;b&gt;Line two&lt;/b&gt;"));
        assert!(mail.text.contains("Email: ann@gmail.com"));
    }

    #[test]
    fn test_contact_confirmation_goes_to_sender() {
        let mail = contact_confirmation("Jimowers", &message());
        assert_eq!(mail.to, "ann@gmail.com");
        assert!(mail.html.contains("Dear Ann,"));
        assert!(mail.html.contains("The Jimowers Team"));
    }

    #[test]
    fn test_newsletter_mails() {
        let welcome = newsletter_welcome("Jimowers", " reader@gmail.com ");
        assert_eq!(welcome.to, "reader@gmail.com");
        assert_eq!(welcome.subject, "Welcome to Our Newsletter!");

        let admin = newsletter_admin("owner@example.com", "reader@gmail.com");
        assert_eq!(admin.to, "owner@example.com");
        assert!(admin.html.contains("reader@gmail.com"));
    }
}
