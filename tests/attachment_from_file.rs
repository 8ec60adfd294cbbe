#[cfg(feature = "builder")]
mod test {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use courier::{
        message::{Attachment, MimeTable},
        Address, Error, Message,
    };
    use pretty_assertions::assert_eq;

    const HELLO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/hello.txt");
    const PIXEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/pixel.png");

    fn attachment_body<'a>(payload: &'a str, filename: &str) -> &'a str {
        let disposition = format!("Content-Disposition: attachment; filename=\"{filename}\"\r\n\r\n");
        let start = payload.find(&disposition).unwrap() + disposition.len();
        let end = start + payload[start..].find("\r\n--").unwrap();
        &payload[start..end]
    }

    #[test]
    fn attachments_from_files() {
        let hello = Attachment::from_path(HELLO).unwrap();
        let pixel = Attachment::from_path(PIXEL).unwrap();
        assert_eq!(hello.name(), "hello.txt");
        assert_eq!(hello.content_type(), "text/plain");
        assert_eq!(pixel.name(), "pixel.png");
        assert_eq!(pixel.content_type(), "image/png");

        let message = Message::builder()
            .from("nobody@domain.tld".into())
            .to(Address::named("Hei", "hei@domain.tld"))
            .subject("Files")
            .body("Two files attached")
            .attachments([hello.clone(), pixel.clone()])
            .build()
            .unwrap();

        let formatted = message.formatted();
        let payload = std::str::from_utf8(formatted.payload()).unwrap();

        assert!(payload.contains("Content-Type: multipart/mixed; boundary=\""));
        assert!(payload.ends_with("--\r\n\r\n."));

        for attachment in [&hello, &pixel] {
            let encoded: String = attachment_body(payload, attachment.name())
                .split("\r\n")
                .inspect(|line| assert!(line.len() <= 76))
                .collect();
            assert_eq!(STANDARD.decode(encoded).unwrap(), attachment.data());
        }

        // the lone dot line of the text file is base64 encoded, not stuffed
        assert_eq!(
            std::fs::read(HELLO).unwrap(),
            hello.data(),
        );
    }

    #[test]
    fn missing_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/missing.txt");
        let err = Attachment::from_path(path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_attachment());
    }

    #[test]
    fn strict_table_rejects_unknown_extension() {
        let dir = std::env::temp_dir().join("courier-strict-table");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("blob.zzunknown");
        std::fs::write(&path, b"data").unwrap();

        let lenient = Attachment::from_path(&path).unwrap();
        assert_eq!(lenient.content_type(), "application/octet-stream");

        let err = Attachment::from_path_with(&path, &MimeTable::strict()).unwrap_err();
        assert!(matches!(err, Error::UnresolvedContentType(ext) if ext == "zzunknown"));
    }
}
