use async_trait::async_trait;
use lettre::message::{Mailbox, Message, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use press_kit_core::config::SmtpSettings;
use press_kit_core::{Error, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// A message ready to send: HTML body with a plain-text alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

/// SMTP relay client.
///
/// With no host configured it only logs what it would have sent, so local
/// preview works without a mail server.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|e| Error::Mail(format!("Invalid SMTP_FROM address: {}", e)))?;

        let transport = if settings.host.trim().is_empty() {
            warn!("SMTP host not configured; mail will be logged, not sent");
            None
        } else {
            let builder = if settings.starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            }
            .map_err(|e| Error::Mail(format!("Failed to configure SMTP transport: {}", e)))?
            .port(settings.port);

            let builder = match (&settings.username, &settings.password) {
                (Some(username), Some(password)) => {
                    builder.credentials(Credentials::new(username.clone(), password.clone()))
                }
                _ => builder,
            };

            info!(host = %settings.host, port = settings.port, "SMTP transport configured");
            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        let Some(transport) = &self.transport else {
            info!(
                subject = %mail.subject,
                to = %mail.to,
                "Mailer in no-op mode; skipping actual send"
            );
            return Ok(());
        };

        let to = mail
            .to
            .parse::<Mailbox>()
            .map_err(|e| Error::Mail(format!("Invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(mail.text, mail.html))
            .map_err(|e| Error::Mail(format!("Failed to build message: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| Error::Mail(format!("Failed to send mail: {}", e)))?;
        info!(subject = %mail.subject, "mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::Config;

    #[test]
    fn test_empty_host_is_noop() {
        let mailer = SmtpMailer::new(&Config::default().smtp).unwrap();
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn test_invalid_from_is_rejected() {
        let settings = SmtpSettings {
            from: "not an address".to_string(),
            ..Config::default().smtp
        };
        assert!(matches!(SmtpMailer::new(&settings), Err(Error::Mail(_))));
    }

    #[tokio::test]
    async fn test_noop_send_succeeds() {
        let mailer = SmtpMailer::new(&Config::default().smtp).unwrap();
        let result = mailer
            .send(OutgoingMail {
                to: "reader@gmail.com".to_string(),
                subject: "Hello".to_string(),
                html: "<p>Hello</p>".to_string(),
                text: "Hello".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    // the pooled transport spawns onto the runtime, so this needs one
    #[tokio::test]
    async fn test_relay_with_credentials() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_string(),
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
            ..Config::default().smtp
        };
        assert!(SmtpMailer::new(&settings).unwrap().is_enabled());
    }
}
