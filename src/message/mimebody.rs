use std::{borrow::Cow, io::Write, mem};

use uuid::Uuid;

use crate::message::{
    header::{self, Headers},
    EmailFormat,
};

/// MIME part variants
#[derive(Debug, Clone)]
pub(crate) enum Part {
    /// Single part with content
    Single(SinglePart),

    /// Multiple parts of content
    Multi(MultiPart),
}

impl EmailFormat for Part {
    fn format(&self, out: &mut Vec<u8>) {
        match self {
            Part::Single(part) => part.format(out),
            Part::Multi(part) => part.format(out),
        }
    }
}

/// Single part
#[derive(Debug, Clone)]
pub(crate) struct SinglePart {
    headers: Headers,
    body: Vec<u8>,
}

impl SinglePart {
    /// `text/plain` or `text/html` part in UTF-8
    pub(crate) fn text(subtype: &str, body: String) -> Self {
        let mut headers = Headers::new();
        headers.push(
            header::CONTENT_TYPE,
            format!("text/{subtype}; charset=\"UTF-8\""),
        );

        SinglePart {
            headers,
            body: crlf_line_endings(body).into_bytes(),
        }
    }

    /// Base64 encoded attachment part
    pub(crate) fn attachment(filename: &str, content_type: &str, data: &[u8]) -> Self {
        let mut headers = Headers::new();
        headers.push(header::CONTENT_TYPE, content_type);
        headers.push(header::CONTENT_TRANSFER_ENCODING, "base64");
        headers.push(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", quote_escape(filename)),
        );

        let len = email_encoding::body::base64::encoded_len(data.len());
        let mut body = String::with_capacity(len);
        email_encoding::body::base64::encode(data, &mut body).expect("encode body as base64");

        SinglePart {
            headers,
            body: body.into_bytes(),
        }
    }
}

/// Escapes `\\` and `"` for use inside a quoted-string
fn quote_escape(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| c == '\\' || c == '"') {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Conversion to CRLF line endings
///
/// A bare `\n` becomes `\r\n`, existing CRLF pairs are left alone.
pub(crate) fn crlf_line_endings(mut string: String) -> String {
    let indices = find_all_lf_char_indices(&string);

    for i in indices {
        // this relies on `indices` being in reverse order
        string.insert(i, '\r');
    }
    string
}

/// Find indices to all places where `\r` should be inserted
///
/// The list is reversed, which is more efficient.
fn find_all_lf_char_indices(s: &str) -> Vec<usize> {
    let mut indices = Vec::new();

    let mut found_lf = false;
    for (i, c) in s.char_indices().rev() {
        if mem::take(&mut found_lf) && c != '\r' {
            // the previous character was `\n`, but this isn't a `\r`
            indices.push(i + c.len_utf8());
        }

        found_lf = c == '\n';
    }

    if found_lf {
        // the first character is `\n`
        indices.push(0);
    }

    indices
}

impl EmailFormat for SinglePart {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out.extend_from_slice(b"\r\n");
    }
}

/// The kind of multipart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MultiPartKind {
    /// Mixed kind to combine unrelated content parts
    ///
    /// Used to mix the message text and attachments.
    Mixed,

    /// Alternative kind to join several variants of same email contents.
    ///
    /// Joins the plain and HTML renderings of the body.
    Alternative,
}

impl MultiPartKind {
    fn subtype(self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::Alternative => "alternative",
        }
    }
}

/// Create a random MIME boundary: 32 lowercase hex digits.
pub(crate) fn make_boundary() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Multipart variant with parts
#[derive(Debug, Clone)]
pub(crate) struct MultiPart {
    headers: Headers,
    boundary: String,
    parts: Vec<Part>,
}

impl MultiPart {
    /// Creates an empty multipart of `kind` delimited by `boundary`
    pub(crate) fn new(kind: MultiPartKind, boundary: String) -> Self {
        let mut headers = Headers::new();
        headers.push(
            header::CONTENT_TYPE,
            format!("multipart/{}; boundary=\"{}\"", kind.subtype(), boundary),
        );

        MultiPart {
            headers,
            boundary,
            parts: Vec::new(),
        }
    }

    /// Creates mixed multipart
    pub(crate) fn mixed(boundary: String) -> Self {
        Self::new(MultiPartKind::Mixed, boundary)
    }

    /// Creates alternative multipart
    pub(crate) fn alternative(boundary: String) -> Self {
        Self::new(MultiPartKind::Alternative, boundary)
    }

    /// Appends a header after `Content-Type`
    pub(crate) fn header<V: Into<String>>(mut self, name: &'static str, value: V) -> Self {
        self.headers.push(name, value);
        self
    }

    /// Add single part to multipart
    pub(crate) fn singlepart(mut self, part: SinglePart) -> Self {
        self.parts.push(Part::Single(part));
        self
    }

    /// Add multi part to multipart
    pub(crate) fn multipart(mut self, part: MultiPart) -> Self {
        self.parts.push(Part::Multi(part));
        self
    }

    /// Get the boundary of multipart contents
    #[cfg(test)]
    pub(crate) fn boundary(&self) -> &str {
        &self.boundary
    }
}

impl EmailFormat for MultiPart {
    fn format(&self, out: &mut Vec<u8>) {
        write!(out, "{}", self.headers)
            .expect("A Write implementation panicked while formatting headers");
        out.extend_from_slice(b"\r\n");

        for part in &self.parts {
            out.extend_from_slice(b"--");
            out.extend_from_slice(self.boundary.as_bytes());
            out.extend_from_slice(b"\r\n");
            part.format(out);
        }

        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(b"--\r\n");
    }
}
