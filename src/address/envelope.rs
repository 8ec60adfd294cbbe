use crate::Error;

/// Simple email envelope representation
///
/// Holds bare addresses only, display names never reach the SMTP
/// `MAIL FROM` / `RCPT TO` commands.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    /// The envelope recipients' addresses
    ///
    /// This can not be empty.
    forward_path: Vec<String>,
    /// The envelope sender address
    reverse_path: Option<String>,
}

impl Envelope {
    /// Creates a new envelope, which may fail if `to` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use courier::Envelope;
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let envelope = Envelope::new(
    ///     Some("from@email.com".to_owned()),
    ///     vec!["to@email.com".to_owned()],
    /// )?;
    /// assert_eq!(envelope.to(), ["to@email.com"]);
    /// assert_eq!(envelope.from(), Some("from@email.com"));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// If `to` has no elements in it.
    pub fn new(from: Option<String>, to: Vec<String>) -> Result<Envelope, Error> {
        if to.is_empty() {
            return Err(Error::MissingTo);
        }
        Ok(Envelope {
            forward_path: to,
            reverse_path: from,
        })
    }

    /// Gets the destination addresses of the envelope.
    ///
    /// One `RCPT TO` command is issued per address.
    pub fn to(&self) -> &[String] {
        self.forward_path.as_slice()
    }

    /// Gets the sender of the envelope.
    pub fn from(&self) -> Option<&str> {
        self.reverse_path.as_deref()
    }
}

#[cfg(feature = "builder")]
impl From<&crate::Message> for Envelope {
    fn from(message: &crate::Message) -> Self {
        let forward_path = message
            .to()
            .iter()
            .chain(message.cc().unwrap_or_default())
            .chain(message.bcc().unwrap_or_default())
            .map(|address| address.address().to_owned())
            .collect();

        // a built message always has at least one `to`
        Envelope {
            forward_path,
            reverse_path: Some(message.from().address().to_owned()),
        }
    }
}
