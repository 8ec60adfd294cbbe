use std::{fs, path::Path};

use super::content_type::{ContentTypeLookup, MimeTable};
use crate::Error;

/// A file attached to a [`Message`](super::Message)
///
/// The content is held fully in memory and sent base64 encoded with a
/// `Content-Disposition: attachment` header.
///
/// # Examples
///
/// ```
/// use courier::message::Attachment;
///
/// let attachment = Attachment::new("notes.txt", "text/plain", b"abc".to_vec());
/// assert_eq!(attachment.name(), "notes.txt");
/// assert_eq!(attachment.content_type(), "text/plain");
/// assert_eq!(attachment.data(), b"abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    content_type: String,
    data: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from its parts
    pub fn new<N, C>(name: N, content_type: C, data: Vec<u8>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Loads an attachment from a file, resolving its content type with the
    /// default [`MimeTable`]
    ///
    /// Unknown extensions are sent as `application/octet-stream`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_path_with(path, &MimeTable::new())
    }

    /// Loads an attachment from a file, resolving its content type with
    /// `lookup` keyed by the lowercase file extension
    ///
    /// The name is the part of the path after the last `/`, the whole file
    /// is read into memory.
    ///
    /// # Errors
    ///
    /// * [`Error::CannotParseFilename`] if the path ends with `/` or is not UTF-8
    /// * [`Error::UnresolvedContentType`] if `lookup` cannot resolve the extension
    /// * [`Error::Io`] if the file does not exist or cannot be read
    pub fn from_path_with<P, L>(path: P, lookup: &L) -> Result<Self, Error>
    where
        P: AsRef<Path>,
        L: ContentTypeLookup + ?Sized,
    {
        let path = path.as_ref();
        let name = path
            .to_str()
            .and_then(|p| p.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .ok_or(Error::CannotParseFilename)?;

        let content_type = lookup.resolve(&extension(name))?;
        let data = fs::read(path)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            name,
            content_type = %content_type,
            size = data.len(),
            "loaded attachment"
        );

        Ok(Self::new(name, content_type.to_string(), data))
    }

    /// The file name, sent in `Content-Disposition`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The MIME type, sent in `Content-Type`
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The raw content
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Lowercase text after the last `.` of a file name, empty when there is none
fn extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use super::{extension, Attachment};
    use crate::{message::MimeTable, Error};

    fn scratch_file(name: &str, content: &[u8]) -> PathBuf {
        let dir = env::temp_dir().join(format!("courier-attachment-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn extensions() {
        assert_eq!(extension("report.PDF"), "pdf");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("README"), "");
        assert_eq!(extension(".bashrc"), "bashrc");
    }

    #[test]
    fn from_path() {
        let path = scratch_file("hello.txt", b"Hello world!");
        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.name(), "hello.txt");
        assert_eq!(attachment.content_type(), "text/plain");
        assert_eq!(attachment.data(), b"Hello world!");
    }

    #[test]
    fn from_path_uppercase_extension() {
        let path = scratch_file("IMAGE.PNG", &[0x89, b'P', b'N', b'G']);
        let attachment = Attachment::from_path(&path).unwrap();
        assert_eq!(attachment.name(), "IMAGE.PNG");
        assert_eq!(attachment.content_type(), "image/png");
    }

    #[test]
    fn from_path_unknown_extension() {
        let path = scratch_file("blob.nosuchext", &[0, 1, 2]);
        assert_eq!(
            Attachment::from_path(&path).unwrap().content_type(),
            "application/octet-stream"
        );
        assert!(matches!(
            Attachment::from_path_with(&path, &MimeTable::strict()),
            Err(Error::UnresolvedContentType(_))
        ));
    }

    #[test]
    fn from_path_custom_lookup() {
        let path = scratch_file("main.rs", b"fn main() {}");
        let lookup = |ext: &str| (ext == "rs").then(|| mime::TEXT_PLAIN_UTF_8);
        let attachment = Attachment::from_path_with(&path, &lookup).unwrap();
        assert_eq!(attachment.content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn from_path_missing_file() {
        let path = env::temp_dir().join("courier-no-such-dir/missing.txt");
        assert!(matches!(Attachment::from_path(path), Err(Error::Io(_))));
    }

    #[test]
    fn from_path_empty_basename() {
        assert!(matches!(
            Attachment::from_path("some/dir/"),
            Err(Error::CannotParseFilename)
        ));
        assert!(matches!(
            Attachment::from_path(""),
            Err(Error::CannotParseFilename)
        ));
    }
}
