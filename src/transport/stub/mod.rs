//! The stub transport logs message envelopes and keeps the content. It can be
//! useful for testing purposes.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "builder")]
//! # {
//! use courier::{transport::stub::StubTransport, Message, Transport};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let email = Message::builder()
//!     .from("nobody@domain.tld".into())
//!     .to("hei@domain.tld".into())
//!     .subject("Happy new year")
//!     .body("Be happy!")
//!     .build()?;
//!
//! let sender = StubTransport::new_ok();
//! sender.send(&email)?;
//! assert_eq!(sender.messages().len(), 1);
//! # Ok(())
//! # }
//! # }
//! ```

use std::{
    error::Error as StdError,
    fmt,
    sync::{Arc, Mutex},
};

use crate::{Envelope, Transport};

/// An error returned by the stub transport
#[non_exhaustive]
#[derive(Debug, Copy, Clone)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stub error")
    }
}

impl StdError for Error {}

/// This transport logs the message envelope and returns the given response
///
/// Clones share the list of received messages.
#[derive(Debug, Clone)]
pub struct StubTransport {
    response: Result<(), Error>,
    message_log: Arc<Mutex<Vec<(Envelope, Vec<u8>)>>>,
}

impl StubTransport {
    /// Creates a new transport that always returns the given response
    pub fn new(response: Result<(), Error>) -> StubTransport {
        StubTransport {
            response,
            message_log: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Creates a new transport that always returns a success response
    pub fn new_ok() -> StubTransport {
        StubTransport::new(Ok(()))
    }

    /// Creates a new transport that always returns an error
    pub fn new_error() -> StubTransport {
        StubTransport::new(Err(Error))
    }

    /// Return all logged messages sent using [`Transport::send_raw`]
    pub fn messages(&self) -> Vec<(Envelope, Vec<u8>)> {
        self.message_log
            .lock()
            .expect("Couldn't acquire lock to read message log")
            .clone()
    }
}

impl Transport for StubTransport {
    type Ok = ();
    type Error = Error;

    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = ?envelope.from(),
            to = ?envelope.to(),
            size = email.len(),
            "stub transport received message"
        );

        self.message_log
            .lock()
            .expect("Couldn't acquire lock to write message log")
            .push((envelope.clone(), email.to_vec()));
        self.response
    }
}
