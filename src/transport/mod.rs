//! ### Sending Messages
//!
//! This section explains how to hand the messages you have created to
//! something that delivers them.
//!
//! A transport receives the [`Envelope`] and the formatted payload. It issues
//! one `RCPT TO` per envelope recipient, bcc recipients included, and sends
//! the payload verbatim after the `DATA` command. The payload already ends
//! with the `.` line closing the `DATA` command.
//!
//! The following transports are available:
//!
//! * The `StubTransport` is useful for debugging and testing: it logs the
//!   envelope, keeps every message it receives and returns a fixed result.

#[cfg(feature = "builder")]
use crate::Message;
use crate::Envelope;

pub mod stub;

/// Blocking Transport method for emails
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends the email
    #[cfg(feature = "builder")]
    #[cfg_attr(docsrs, doc(cfg(feature = "builder")))]
    fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        let raw = message.formatted();
        self.send_raw(&message.envelope(), raw.payload())
    }

    /// Sends an already formatted payload to the envelope recipients
    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error>;
}
