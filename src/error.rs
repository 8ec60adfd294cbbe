//! Error type for building messages and attachments

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
    io,
};

/// Error type for email content
///
/// Only the construction phase can fail: building a [`Message`](crate::Message),
/// loading an [`Attachment`](crate::message::Attachment) or creating an
/// [`Envelope`](crate::Envelope). Formatting a built message never fails.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Missing from in message
    MissingFrom,
    /// Missing to in message or envelope
    MissingTo,
    /// A value bound for the given header contains a CR or LF
    InvalidHeaderValue(&'static str),
    /// Cannot parse filename for attachment
    CannotParseFilename,
    /// No content type is known for the given file extension
    UnresolvedContentType(String),
    /// IO error while reading an attachment
    Io(io::Error),
}

impl Error {
    /// Returns true if the error happened while loading an attachment
    pub fn is_attachment(&self) -> bool {
        matches!(
            self,
            Error::CannotParseFilename | Error::UnresolvedContentType(_) | Error::Io(_)
        )
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::MissingFrom => fmt.write_str("missing source address, invalid message"),
            Error::MissingTo => fmt.write_str("missing destination address, invalid envelope"),
            Error::InvalidHeaderValue(header) => {
                write!(fmt, "line break in the value of the {header} header")
            }
            Error::CannotParseFilename => fmt.write_str("could not parse attachment filename"),
            Error::UnresolvedContentType(ext) => {
                write!(fmt, "no content type known for extension {ext:?}")
            }
            Error::Io(e) => e.fmt(fmt),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}
