//! Header lines of a formatted message
// https://tools.ietf.org/html/rfc5322#section-2.2

use std::{
    fmt::{self, Display},
    time::SystemTime,
};

use httpdate::HttpDate;

use crate::Error;

pub(crate) const FROM: &str = "From";
pub(crate) const TO: &str = "To";
pub(crate) const CC: &str = "Cc";
/// Only used to name errors, bcc recipients are never written to the header block
pub(crate) const BCC: &str = "Bcc";
pub(crate) const REPLY_TO: &str = "Reply-to";
pub(crate) const SUBJECT: &str = "Subject";
pub(crate) const DATE: &str = "Date";
pub(crate) const MESSAGE_ID: &str = "Message-ID";
pub(crate) const IN_REPLY_TO: &str = "In-Reply-To";
pub(crate) const REFERENCES: &str = "References";
pub(crate) const RETURN_RECEIPT_TO: &str = "Return-Receipt-To";
pub(crate) const DISPOSITION_NOTIFICATION_TO: &str = "Disposition-Notification-To";
pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const CONTENT_TRANSFER_ENCODING: &str = "Content-Transfer-Encoding";
pub(crate) const CONTENT_DISPOSITION: &str = "Content-Disposition";
pub(crate) const MIME_VERSION: &str = "Mime-Version";

/// Ordered list of header lines
///
/// Values are written verbatim, without folding or encoded-words.
#[derive(Debug, Clone, Default)]
pub(crate) struct Headers {
    headers: Vec<(&'static str, String)>,
}

impl Headers {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    pub(crate) fn push<V: Into<String>>(&mut self, name: &'static str, value: V) {
        self.headers.push((name, value.into()));
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
            .map(|(_name, value)| value.as_str())
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            f.write_str(name)?;
            f.write_str(": ")?;
            f.write_str(value)?;
            f.write_str("\r\n")?;
        }

        Ok(())
    }
}

/// Checks that a value can sit on a single header line
pub(crate) fn check_value(header: &'static str, value: &str) -> Result<(), Error> {
    if value.contains(|c: char| c == '\r' || c == '\n') {
        Err(Error::InvalidHeaderValue(header))
    } else {
        Ok(())
    }
}

/// Value of the `Date` header, `Tue, 15 Nov 1994 08:12:31 +0000`
///
/// Always rendered in UTC with English day and month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EmailDate(HttpDate);

impl From<SystemTime> for EmailDate {
    fn from(st: SystemTime) -> Self {
        Self(st.into())
    }
}

impl Display for EmailDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.to_string();
        // httpdate always appends ` GMT`, email wants a numeric zone
        match s.strip_suffix(" GMT") {
            Some(s) => write!(f, "{s} +0000"),
            None => f.write_str(&s),
        }
    }
}
