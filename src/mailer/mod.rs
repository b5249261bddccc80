//! Outgoing notification delivery.

mod outbox;
mod sendmail;

pub use outbox::OutboxMailer;
pub use sendmail::{SendmailMailer, SENDMAIL_DEFAULT_COMMAND};

use crate::error::{Error, Result};
use crate::model::Blob;
use mail_builder::MessageBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Blob>,
}

impl Notification {
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments.iter().map(|a| a.name.as_str()).collect()
    }
}

pub trait Mailer {
    /// Deliver one notification. An `Err` means it was not sent.
    fn send(&self, notification: &Notification) -> Result<()>;
}

impl<M: Mailer + ?Sized> Mailer for &M {
    fn send(&self, notification: &Notification) -> Result<()> {
        (**self).send(notification)
    }
}

impl<M: Mailer + ?Sized> Mailer for Box<M> {
    fn send(&self, notification: &Notification) -> Result<()> {
        (**self).send(notification)
    }
}

/// Render a notification as an RFC 5322 message.
pub fn build_message(from: &str, notification: &Notification) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new()
        .from(from)
        .to(notification.to.as_str())
        .subject(notification.subject.as_str())
        .text_body(notification.body.as_str());

    for blob in &notification.attachments {
        builder = builder.attachment(
            blob.content_type.as_str(),
            blob.name.as_str(),
            blob.data.clone(),
        );
    }

    builder
        .write_to_vec()
        .map_err(|e| Error::Delivery(format!("Cannot build message: {}", e)))
}
