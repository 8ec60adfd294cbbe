//! Provides a strongly typed way to build emails
//!
//! ## Usage
//!
//! This section demonstrates how to build messages.
//!
//! ### Plain body
//!
//! The easiest way of creating a message, which uses a plain text body.
//!
//! ```rust
//! use courier::{message::Message, Address};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from(Address::named("NoBody", "nobody@domain.tld"))
//!     .reply_to(Address::named("Yuin", "yuin@domain.tld"))
//!     .to(Address::named("Hei", "hei@domain.tld"))
//!     .subject("Happy new year")
//!     .body("Be happy!")
//!     .build()?;
//! let formatted = m.formatted();
//! # Ok(())
//! # }
//! ```
//!
//! Which produces:
//!
//! ```sh
//! From: NoBody <nobody@domain.tld>
//! To: Hei <hei@domain.tld>
//! Reply-to: Yuin <yuin@domain.tld>
//! Subject: Happy new year
//! Date: Sat, 12 Dec 2020 16:33:19 +0000
//! Message-ID: <1607790799000000@domain.tld>
//! Content-Type: text/plain; charset="UTF-8"
//! Mime-Version: 1.0
//!
//! Be happy!
//! .
//! ```
//!
//! The final `.` line ends the payload of the SMTP `DATA` command. Header
//! values are written verbatim; line breaks in them are rejected when the
//! message is built.
//!
//! ### HTML body and attachments
//!
//! An HTML body is sent as `multipart/alternative` together with a plain text
//! rendering obtained by removing everything that looks like a tag. As soon
//! as there is an attachment the whole body is wrapped in `multipart/mixed`.
//!
//! ```rust
//! use courier::message::{Attachment, Message};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let m = Message::builder()
//!     .from("a@x.com".into())
//!     .to("b@y.com".into())
//!     .subject("Hi")
//!     .html_body("<p>Hello</p>")
//!     .attachment(Attachment::new("f.txt", "text/plain", b"abc".to_vec()))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! Which produces:
//!
//! ```sh
//! From: a@x.com
//! To: b@y.com
//! Subject: Hi
//! Date: Sat, 12 Dec 2020 16:30:45 +0000
//! Message-ID: <1607790645000000@x.com>
//! Content-Type: multipart/mixed; boundary="3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47"
//! Mime-Version: 1.0
//!
//! --3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47
//! Content-Type: multipart/alternative; boundary="alt3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47"
//!
//! --alt3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47
//! Content-Type: text/plain; charset="UTF-8"
//!
//! Hello
//! --alt3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47
//! Content-Type: text/html; charset="UTF-8"
//!
//! <p>Hello</p>
//! --alt3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47--
//! --3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47
//! Content-Type: text/plain
//! Content-Transfer-Encoding: base64
//! Content-Disposition: attachment; filename="f.txt"
//!
//! YWJj
//! --3a2c6fba0b1e4c7c9a3b0d5c8e2f1a47--
//!
//! .
//! ```

pub use attachment::Attachment;
pub use content_type::{ContentTypeLookup, MimeTable};
pub use format::Formatted;

mod attachment;
mod content_type;
mod format;
mod header;
mod mimebody;

use crate::{address::Envelope, message::header::check_value, Address, Error};

/// Something that can be formatted as an email message
trait EmailFormat {
    // Use a writer?
    fn format(&self, out: &mut Vec<u8>);
}

/// A builder for messages
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    from: Option<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    reply_to: Option<Address>,
    subject: String,
    body: String,
    is_body_html: bool,
    reference: Option<String>,
    return_receipt: Option<Address>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    /// Creates a new default message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender, rendered in the `From` header and used as the
    /// envelope reverse-path
    pub fn from(mut self, address: Address) -> Self {
        self.from = Some(address);
        self
    }

    /// Add a recipient to the `To` header
    pub fn to(mut self, address: Address) -> Self {
        self.to.push(address);
        self
    }

    /// Add a recipient to the `Cc` header
    pub fn cc(mut self, address: Address) -> Self {
        self.cc.push(address);
        self
    }

    /// Add a blind carbon copy recipient
    ///
    /// Bcc recipients only end up in the [`Envelope`], never in a header.
    pub fn bcc(mut self, address: Address) -> Self {
        self.bcc.push(address);
        self
    }

    /// Set the `Reply-to` header
    pub fn reply_to(mut self, address: Address) -> Self {
        self.reply_to = Some(address);
        self
    }

    /// Set the `Subject` header
    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the body, plain text unless [`html`](Self::html) marks it as HTML
    ///
    /// Bare `\n` line endings are sent as CRLF.
    pub fn body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = body.into();
        self
    }

    /// Set an HTML body
    ///
    /// A plain text alternative is derived from it when formatting.
    pub fn html_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = body.into();
        self.is_body_html = true;
        self
    }

    /// Mark the body as HTML or plain text
    pub fn html(mut self, is_body_html: bool) -> Self {
        self.is_body_html = is_body_html;
        self
    }

    /// Set the message id of the message this one replies to, sent in both
    /// [`In-Reply-To` and `References`](https://tools.ietf.org/html/rfc5322#section-3.6.4)
    pub fn reference<S: Into<String>>(mut self, id: S) -> Self {
        self.reference = Some(id.into());
        self
    }

    /// Request a read receipt, sent in both `Return-Receipt-To` and
    /// `Disposition-Notification-To`
    pub fn return_receipt(mut self, address: Address) -> Self {
        self.return_receipt = Some(address);
        self
    }

    /// Add an attachment
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Add several attachments, keeping their order
    pub fn attachments<I: IntoIterator<Item = Attachment>>(mut self, attachments: I) -> Self {
        self.attachments.extend(attachments);
        self
    }

    /// Create the [`Message`]
    ///
    /// # Errors
    ///
    /// * [`Error::MissingFrom`] if no sender was set
    /// * [`Error::MissingTo`] if no `to` recipient was added
    /// * [`Error::InvalidHeaderValue`] if a value that ends up on a header
    ///   line, or in the envelope, contains a line break
    pub fn build(self) -> Result<Message, Error> {
        let from = self.from.ok_or(Error::MissingFrom)?;
        if self.to.is_empty() {
            return Err(Error::MissingTo);
        }

        check_address(header::FROM, &from)?;
        for address in &self.to {
            check_address(header::TO, address)?;
        }
        for address in &self.cc {
            check_address(header::CC, address)?;
        }
        for address in &self.bcc {
            check_address(header::BCC, address)?;
        }
        if let Some(address) = &self.reply_to {
            check_address(header::REPLY_TO, address)?;
        }
        check_value(header::SUBJECT, &self.subject)?;
        if let Some(reference) = &self.reference {
            check_value(header::IN_REPLY_TO, reference)?;
        }
        if let Some(address) = &self.return_receipt {
            check_address(header::RETURN_RECEIPT_TO, address)?;
        }
        for attachment in &self.attachments {
            check_value(header::CONTENT_DISPOSITION, attachment.name())?;
            check_value(header::CONTENT_TYPE, attachment.content_type())?;
        }

        Ok(Message {
            from,
            to: self.to,
            cc: non_empty(self.cc),
            bcc: non_empty(self.bcc),
            reply_to: self.reply_to,
            subject: self.subject,
            body: self.body,
            is_body_html: self.is_body_html,
            reference: self.reference,
            return_receipt: self.return_receipt,
            attachments: self.attachments,
        })
    }
}

fn check_address(header: &'static str, address: &Address) -> Result<(), Error> {
    check_value(header, address.address())?;
    match address.name() {
        Some(name) => check_value(header, name),
        None => Ok(()),
    }
}

fn non_empty(addresses: Vec<Address>) -> Option<Vec<Address>> {
    if addresses.is_empty() {
        None
    } else {
        Some(addresses)
    }
}

/// Email message which can be formatted
///
/// Immutable once built. Every call to [`formatted`](Message::formatted)
/// produces a new `Date`, `Message-ID` and new boundaries.
#[derive(Clone, Debug)]
pub struct Message {
    from: Address,
    to: Vec<Address>,
    cc: Option<Vec<Address>>,
    bcc: Option<Vec<Address>>,
    reply_to: Option<Address>,
    subject: String,
    body: String,
    is_body_html: bool,
    reference: Option<String>,
    return_receipt: Option<Address>,
    attachments: Vec<Attachment>,
}

impl Message {
    /// Create a new message builder without headers
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// The sender
    pub fn from(&self) -> &Address {
        &self.from
    }

    /// The `To` recipients, never empty
    pub fn to(&self) -> &[Address] {
        &self.to
    }

    /// The `Cc` recipients, if any
    pub fn cc(&self) -> Option<&[Address]> {
        self.cc.as_deref()
    }

    /// The blind carbon copy recipients, if any
    pub fn bcc(&self) -> Option<&[Address]> {
        self.bcc.as_deref()
    }

    pub fn reply_to(&self) -> Option<&Address> {
        self.reply_to.as_ref()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_body_html(&self) -> bool {
        self.is_body_html
    }

    /// Message id of the message this one replies to
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn return_receipt(&self) -> Option<&Address> {
        self.return_receipt.as_ref()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Get `Message` envelope
    ///
    /// The forward-path lists `to`, then `cc`, then `bcc` recipients.
    pub fn envelope(&self) -> Envelope {
        self.into()
    }
}

#[cfg(test)]
mod test {
    use super::{Attachment, Message};
    use crate::{Address, Error};

    #[test]
    fn email_missing_originator() {
        assert!(matches!(
            Message::builder()
                .to("hei@domain.tld".into())
                .body("Happy new year!")
                .build(),
            Err(Error::MissingFrom)
        ));
    }

    #[test]
    fn email_missing_recipient() {
        assert!(matches!(
            Message::builder()
                .from("nobody@domain.tld".into())
                .cc("hei@domain.tld".into())
                .body("Happy new year!")
                .build(),
            Err(Error::MissingTo)
        ));
    }

    #[test]
    fn email_minimal_message() {
        let message = Message::builder()
            .from(Address::named("NoBody", "nobody@domain.tld"))
            .to(Address::named("NoBody", "nobody@domain.tld"))
            .body("Happy new year!")
            .build()
            .unwrap();

        assert_eq!(message.subject(), "");
        assert!(!message.is_body_html());
        assert!(message.cc().is_none());
        assert!(message.bcc().is_none());
        assert!(message.attachments().is_empty());
    }

    #[test]
    fn builder_keeps_everything() {
        let message = Message::builder()
            .from("nobody@domain.tld".into())
            .to("hei@domain.tld".into())
            .cc("cc@domain.tld".into())
            .bcc("bcc@domain.tld".into())
            .reply_to("yuin@domain.tld".into())
            .return_receipt("receipts@domain.tld".into())
            .reference("<1234@domain.tld>")
            .subject("Happy new year")
            .html_body("<p>Be happy!</p>")
            .attachment(Attachment::new("a.txt", "text/plain", b"a".to_vec()))
            .attachments(vec![
                Attachment::new("b.txt", "text/plain", b"b".to_vec()),
                Attachment::new("c.txt", "text/plain", b"c".to_vec()),
            ])
            .build()
            .unwrap();

        assert_eq!(message.from().address(), "nobody@domain.tld");
        assert_eq!(message.cc().unwrap()[0].address(), "cc@domain.tld");
        assert_eq!(message.bcc().unwrap()[0].address(), "bcc@domain.tld");
        assert_eq!(message.reply_to().unwrap().address(), "yuin@domain.tld");
        assert_eq!(
            message.return_receipt().unwrap().address(),
            "receipts@domain.tld"
        );
        assert_eq!(message.reference(), Some("<1234@domain.tld>"));
        assert_eq!(message.body(), "<p>Be happy!</p>");
        assert!(message.is_body_html());
        let names: Vec<&str> = message.attachments().iter().map(Attachment::name).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn html_flag_toggles() {
        let message = Message::builder()
            .from("nobody@domain.tld".into())
            .to("hei@domain.tld".into())
            .body("<b>hi</b>")
            .html(true)
            .build()
            .unwrap();
        assert!(message.is_body_html());
    }

    #[test]
    fn header_injection_rejected() {
        let base = || {
            Message::builder()
                .from("nobody@domain.tld".into())
                .to("hei@domain.tld".into())
        };

        assert!(matches!(
            base().subject("Hi\r\nBcc: victim@domain.tld").build(),
            Err(Error::InvalidHeaderValue("Subject"))
        ));
        assert!(matches!(
            base()
                .cc(Address::named("Evil\nX-Spam: yes", "cc@domain.tld"))
                .build(),
            Err(Error::InvalidHeaderValue("Cc"))
        ));
        assert!(matches!(
            base().bcc("bcc@domain.tld\r\nRCPT TO:<x@y>".into()).build(),
            Err(Error::InvalidHeaderValue("Bcc"))
        ));
        assert!(matches!(
            base().reference("<id>\r\n").build(),
            Err(Error::InvalidHeaderValue("In-Reply-To"))
        ));
        assert!(matches!(
            base()
                .attachment(Attachment::new("a\r\n.txt", "text/plain", vec![]))
                .build(),
            Err(Error::InvalidHeaderValue("Content-Disposition"))
        ));
        assert!(matches!(
            base()
                .attachment(Attachment::new("a.txt", "text/plain\n", vec![]))
                .build(),
            Err(Error::InvalidHeaderValue("Content-Type"))
        ));
    }

    #[test]
    fn html_flag_independent_of_call_order() {
        let base = || {
            Message::builder()
                .from("nobody@domain.tld".into())
                .to("hei@domain.tld".into())
        };

        let flag_first = base().html(true).body("<b>hi</b>").build().unwrap();
        let body_first = base().body("<b>hi</b>").html(true).build().unwrap();
        assert!(flag_first.is_body_html());
        assert!(body_first.is_body_html());

        let plain = base().html_body("<b>hi</b>").html(false).build().unwrap();
        assert!(!plain.is_body_html());
    }

    #[test]
    fn body_may_contain_line_breaks() {
        assert!(Message::builder()
            .from("nobody@domain.tld".into())
            .to("hei@domain.tld".into())
            .body("line one\r\nline two\n")
            .build()
            .is_ok());
    }
}
