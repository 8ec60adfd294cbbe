//! Resolution of attachment content types from file extensions

use mime::Mime;

use crate::Error;

/// Maps a lowercase file extension to a MIME type.
///
/// Used by [`Attachment::from_path_with`](super::Attachment::from_path_with).
/// Any `Fn(&str) -> Option<Mime>` closure is a lookup with the default
/// fallback.
///
/// # Examples
///
/// ```
/// use courier::message::ContentTypeLookup;
///
/// let lookup = |ext: &str| (ext == "log").then(|| mime::TEXT_PLAIN);
/// assert_eq!(lookup.resolve("log").unwrap(), mime::TEXT_PLAIN);
/// assert_eq!(lookup.resolve("bin").unwrap(), mime::APPLICATION_OCTET_STREAM);
/// ```
pub trait ContentTypeLookup {
    /// Looks up the MIME type registered for `extension`
    fn lookup(&self, extension: &str) -> Option<Mime>;

    /// Type used when `lookup` has no answer, `None` makes it an error
    ///
    /// Defaults to `application/octet-stream`.
    fn fallback(&self) -> Option<Mime> {
        Some(mime::APPLICATION_OCTET_STREAM)
    }

    /// Looks up `extension`, falling back to [`fallback`](Self::fallback)
    ///
    /// # Errors
    ///
    /// [`Error::UnresolvedContentType`] if neither yields a type.
    fn resolve(&self, extension: &str) -> Result<Mime, Error> {
        self.lookup(extension)
            .or_else(|| self.fallback())
            .ok_or_else(|| Error::UnresolvedContentType(extension.to_owned()))
    }
}

impl<F> ContentTypeLookup for F
where
    F: Fn(&str) -> Option<Mime>,
{
    fn lookup(&self, extension: &str) -> Option<Mime> {
        self(extension)
    }
}

/// Extension table backed by [`mime_guess`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MimeTable {
    strict: bool,
}

impl MimeTable {
    /// Table falling back to `application/octet-stream` for unknown extensions
    pub const fn new() -> Self {
        Self { strict: false }
    }

    /// Table without fallback, unknown extensions are an error
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeLookup for MimeTable {
    fn lookup(&self, extension: &str) -> Option<Mime> {
        if extension.is_empty() {
            return None;
        }
        mime_guess::from_ext(extension).first()
    }

    fn fallback(&self) -> Option<Mime> {
        if self.strict {
            None
        } else {
            Some(mime::APPLICATION_OCTET_STREAM)
        }
    }
}
