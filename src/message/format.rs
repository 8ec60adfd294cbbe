//! Rendering of a [`Message`] into the payload of the SMTP `DATA` command

use std::{borrow::Cow, io::Write, sync::OnceLock, time::SystemTime};

use regex::Regex;

use super::{
    header::{self, EmailDate, Headers},
    mimebody::{crlf_line_endings, make_boundary, MultiPart, SinglePart},
    EmailFormat, Message,
};
use crate::{time, Address};

/// A formatted message: the `DATA` payload and the id written in its
/// `Message-ID` header
///
/// The payload ends with CRLF followed by a line holding a single `.`,
/// without the final CRLF, which the transport sends along with the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    message_id: String,
    payload: Vec<u8>,
}

impl Formatted {
    /// The generated `Message-ID`, angle brackets included
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// The bytes to send after the `DATA` command
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes `Formatted` and returns the message id and the payload
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.message_id, self.payload)
    }
}

impl AsRef<[u8]> for Formatted {
    fn as_ref(&self) -> &[u8] {
        &self.payload
    }
}

/// Shape of the body, chosen from the attachments and the HTML flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyMode {
    /// `text/plain` only
    Plain,
    /// `multipart/alternative` with plain text and HTML
    Alternative,
    /// `multipart/mixed` with the text parts and the attachments
    Mixed,
}

#[derive(Debug, Clone)]
enum MessageBody {
    Mime(MultiPart),
    Raw(Vec<u8>),
}

impl Message {
    /// Get message content formatted for SMTP
    ///
    /// Every call reads the clock and draws a new boundary, so two calls
    /// never return the same `Message-ID`.
    pub fn formatted(&self) -> Formatted {
        let mut payload = Vec::new();
        let message_id = self.format_into(&mut payload);
        Formatted {
            message_id,
            payload,
        }
    }

    /// Appends the formatted message to `out` and returns its `Message-ID`
    pub fn format_into(&self, out: &mut Vec<u8>) -> String {
        let now = time::now();
        self.format_at(out, now, time::unique_stamp(now), make_boundary())
    }

    fn format_at(&self, out: &mut Vec<u8>, now: SystemTime, stamp: u64, boundary: String) -> String {
        let message_id = message_id(&self.from, stamp);
        let mode = self.body_mode();

        let mut headers = Headers::new();
        headers.push(header::FROM, self.from.to_string());
        headers.push(header::TO, join(&self.to));
        if let Some(cc) = &self.cc {
            headers.push(header::CC, join(cc));
        }
        // bcc recipients are envelope only
        if let Some(reply_to) = &self.reply_to {
            headers.push(header::REPLY_TO, reply_to.to_string());
        }
        headers.push(header::SUBJECT, self.subject.as_str());
        headers.push(header::DATE, EmailDate::from(now).to_string());
        headers.push(header::MESSAGE_ID, message_id.as_str());
        if let Some(reference) = &self.reference {
            headers.push(header::IN_REPLY_TO, reference.as_str());
            headers.push(header::REFERENCES, reference.as_str());
        }
        if let Some(receipt) = &self.return_receipt {
            headers.push(header::RETURN_RECEIPT_TO, receipt.to_string());
            headers.push(header::DISPOSITION_NOTIFICATION_TO, receipt.to_string());
        }

        let body = match mode {
            BodyMode::Mixed => {
                let alternative = self.text_parts(MultiPart::alternative(format!("alt{boundary}")));
                let mixed = MultiPart::mixed(boundary)
                    .header(header::MIME_VERSION, "1.0")
                    .multipart(alternative);
                MessageBody::Mime(self.attachments.iter().fold(mixed, |mixed, attachment| {
                    mixed.singlepart(SinglePart::attachment(
                        attachment.name(),
                        attachment.content_type(),
                        attachment.data(),
                    ))
                }))
            }
            BodyMode::Alternative => MessageBody::Mime(self.text_parts(
                MultiPart::alternative(format!("alt{boundary}")).header(header::MIME_VERSION, "1.0"),
            )),
            BodyMode::Plain => {
                headers.push(header::CONTENT_TYPE, "text/plain; charset=\"UTF-8\"");
                headers.push(header::MIME_VERSION, "1.0");
                MessageBody::Raw(crlf_line_endings(self.body.clone()).into_bytes())
            }
        };

        let mut content = Vec::new();
        write!(content, "{}", headers)
            .expect("A Write implementation panicked while formatting headers");
        match &body {
            MessageBody::Mime(part) => part.format(&mut content),
            MessageBody::Raw(raw) => {
                content.extend_from_slice(b"\r\n");
                content.extend_from_slice(raw);
            }
        }

        out.reserve(content.len() + 3);
        add_transparency(&content, out);
        out.extend_from_slice(b"\r\n.");

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message_id = %message_id,
            mode = ?mode,
            attachments = self.attachments.len(),
            "formatted message"
        );

        message_id
    }

    fn body_mode(&self) -> BodyMode {
        match (self.attachments.is_empty(), self.is_body_html) {
            (false, _) => BodyMode::Mixed,
            (true, true) => BodyMode::Alternative,
            (true, false) => BodyMode::Plain,
        }
    }

    /// Adds the plain text rendering, and the HTML one for HTML bodies
    fn text_parts(&self, alternative: MultiPart) -> MultiPart {
        let alternative =
            alternative.singlepart(SinglePart::text("plain", plain_text(&self.body).into_owned()));
        if self.is_body_html {
            alternative.singlepart(SinglePart::text("html", self.body.clone()))
        } else {
            alternative
        }
    }
}

/// `<` + timestamp + the sender address from its first `@` + `>`
fn message_id(from: &Address, stamp: u64) -> String {
    match from.domain() {
        Some(domain) => format!("<{stamp}@{domain}>"),
        None => format!("<{stamp}>"),
    }
}

fn join(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Removes everything matching `<[^>]+>`
///
/// A plain text fallback, not an HTML to text conversion: entities, scripts
/// and styles are left as they are.
fn plain_text(body: &str) -> Cow<'_, str> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new("<[^>]+>").expect("valid tag pattern"))
        .replace_all(body, "")
}

/// Adds transparency, RFC 5321 section 4.5.2
///
/// Doubles the `.` starting any line so the content cannot contain the end
/// of data sequence. A bare `\n` also starts a line.
fn add_transparency(content: &[u8], out: &mut Vec<u8>) {
    // the content starts at the beginning of a line
    let mut escape_count: u8 = 2;
    let mut start = 0;
    for (idx, byte) in content.iter().enumerate() {
        escape_count = match (escape_count, *byte) {
            (_, b'\r') => 1,
            (_, b'\n') => 2,
            (2, b'.') => 3,
            _ => 0,
        };
        if escape_count == 3 {
            escape_count = 0;
            out.extend_from_slice(&content[start..idx]);
            out.push(b'.');
            start = idx;
        }
    }
    out.extend_from_slice(&content[start..]);
}
