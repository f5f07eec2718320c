use lettre::address::{Address, AddressError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SendmailTransport, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::mailer_config::{MailerConfig, TransportConfig};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("sendmail failed: {0}")]
    Sendmail(#[from] lettre::transport::sendmail::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("mail worker stopped: {0}")]
    Worker(String),
}

/// What the relay hands to the transport for one accepted inquiry.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingInquiry {
    pub reply_to_name: String,
    pub reply_to_email: String,
    pub body: String,
}

/// Delivery seam of the relay. Implementations block, callers run them on the
/// blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait InquiryMailer: Send + Sync {
    fn deliver(&self, inquiry: &OutgoingInquiry) -> Result<(), MailError>;
}

enum Relay {
    Sendmail(SendmailTransport),
    Smtp(SmtpTransport),
}

pub struct LettreMailer {
    from: Mailbox,
    to: Mailbox,
    subject: String,
    relay: Relay,
}

impl LettreMailer {
    pub fn from_config(config: &MailerConfig) -> Result<Self, MailError> {
        let relay = match &config.transport {
            TransportConfig::Sendmail { command: Some(command) } => {
                Relay::Sendmail(SendmailTransport::new_with_command(command))
            }
            TransportConfig::Sendmail { command: None } => Relay::Sendmail(SendmailTransport::new()),
            TransportConfig::Smtp { host, port, credentials } => {
                let mut builder = SmtpTransport::starttls_relay(host)?.port(*port);
                if let Some((user, pass)) = credentials {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }
                Relay::Smtp(builder.build())
            }
        };
        Ok(Self {
            from: config.contact_from.clone(),
            to: config.contact_to.clone(),
            subject: config.subject.clone(),
            relay,
        })
    }

    fn build_message(&self, inquiry: &OutgoingInquiry) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN);

        // The relay's own check is looser than RFC 5322; skip Reply-To rather than drop the inquiry.
        match inquiry.reply_to_email.parse::<Address>() {
            Ok(address) => {
                builder = builder.reply_to(Mailbox::new(Some(inquiry.reply_to_name.clone()), address));
            }
            Err(e) => {
                warn!(email = %inquiry.reply_to_email, error = %e, "reply-to address rejected, sending without it");
            }
        }

        Ok(builder.body(inquiry.body.clone())?)
    }
}

impl InquiryMailer for LettreMailer {
    fn deliver(&self, inquiry: &OutgoingInquiry) -> Result<(), MailError> {
        let message = self.build_message(inquiry)?;
        match &self.relay {
            Relay::Sendmail(transport) => transport.send(&message)?,
            Relay::Smtp(transport) => {
                transport.send(&message)?;
            }
        }
        info!(to = %self.to.email, reply_to = %inquiry.reply_to_email, "inquiry handed to mail transport");
        Ok(())
    }
}
