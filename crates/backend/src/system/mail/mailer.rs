use anyhow::Context;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::shared::config::{MailConfig, SmtpConfig};

/// One uploaded file ready for attaching
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

fn build_transport(smtp: &SmtpConfig) -> anyhow::Result<SmtpTransport> {
    if smtp.host.trim().is_empty() {
        anyhow::bail!("SMTP host is not configured");
    }

    let mut builder = SmtpTransport::relay(&smtp.host)
        .context("Invalid SMTP host")?
        .port(smtp.port.unwrap_or(587));

    if !smtp.username.trim().is_empty() {
        builder = builder.credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ));
    }

    Ok(builder.build())
}

fn mailboxes(mail: &MailConfig) -> anyhow::Result<(Mailbox, Mailbox)> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid sender address in mail config"))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid recipient address in mail config"))?;
    Ok((from, to))
}

/// Compose and send a plain-text message to the configured office mailbox
pub fn send_plain(
    smtp: &SmtpConfig,
    mail: &MailConfig,
    subject: &str,
    body: String,
    reply_to: Option<&str>,
) -> anyhow::Result<()> {
    let (from, to) = mailboxes(mail)?;

    let mut builder = Message::builder().from(from).to(to).subject(subject);
    if let Some(addr) = reply_to {
        if let Ok(mb) = addr.parse::<Mailbox>() {
            builder = builder.reply_to(mb);
        }
    }
    let email = builder.body(body).context("Failed to build email")?;

    let transport = build_transport(smtp)?;
    transport.send(&email).context("Failed to send email")?;
    Ok(())
}

/// Compose and send a message carrying uploaded files
pub fn send_with_attachments(
    smtp: &SmtpConfig,
    mail: &MailConfig,
    subject: &str,
    body: String,
    reply_to: Option<&str>,
    attachments: Vec<MailAttachment>,
) -> anyhow::Result<()> {
    let (from, to) = mailboxes(mail)?;

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(body));
    for attachment in attachments {
        let content_type = ContentType::parse(&attachment.content_type)
            .unwrap_or(ContentType::TEXT_PLAIN);
        multipart = multipart
            .singlepart(Attachment::new(attachment.filename).body(attachment.data, content_type));
    }

    let mut builder = Message::builder().from(from).to(to).subject(subject);
    if let Some(addr) = reply_to {
        if let Ok(mb) = addr.parse::<Mailbox>() {
            builder = builder.reply_to(mb);
        }
    }
    let email = builder
        .multipart(multipart)
        .context("Failed to build email")?;

    let transport = build_transport(smtp)?;
    transport.send(&email).context("Failed to send email")?;
    Ok(())
}
