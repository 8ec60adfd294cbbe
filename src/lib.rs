//! Courier builds email messages and turns them into the exact byte
//! payload an SMTP client writes after the `DATA` command.
//!
//! It provides:
//!
//! * An immutable [`Message`] built through a [`MessageBuilder`](message::MessageBuilder)
//! * Plain text, `multipart/alternative` and `multipart/mixed` layouts
//! * Base64 encoded attachments, loaded from memory or from a file
//! * The [`Envelope`] derived from a message, bcc recipients included
//! * A [`Transport`] trait and a recording stub transport
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "builder")]
//! # {
//! use courier::{message::Attachment, Address, Message};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let message = Message::builder()
//!     .from(Address::named("NoBody", "nobody@domain.tld"))
//!     .to(Address::named("Hei", "hei@domain.tld"))
//!     .subject("Happy new year")
//!     .html_body("<p>Be happy!</p>")
//!     .attachment(Attachment::new("notes.txt", "text/plain", b"hello".to_vec()))
//!     .build()?;
//!
//! let formatted = message.formatted();
//! assert!(formatted.message_id().ends_with("@domain.tld>"));
//! assert!(formatted.payload().ends_with(b"\r\n."));
//! # Ok(())
//! # }
//! # }
//! ```
//!
//! ## Features
//!
//! * **builder** 📫: Message builder and payload serializer (enabled by default)
//! * **tracing** 📢: Debug logging through the `tracing` crate
//! * **serde** 🔄: Serialization support for [`Address`] and [`Envelope`]

#![doc(html_root_url = "https://docs.rs/crate/courier/0.1.0")]
#![forbid(unsafe_code)]
#![deny(
    unused_import_braces,
    trivial_numeric_casts,
    unused_extern_crates,
    rust_2018_idioms
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod address;
pub mod error;
#[cfg(feature = "builder")]
#[cfg_attr(docsrs, doc(cfg(feature = "builder")))]
pub mod message;
#[cfg(feature = "builder")]
mod time;
pub mod transport;

pub use crate::address::{Address, Envelope};
pub use crate::error::Error;
#[cfg(feature = "builder")]
#[doc(inline)]
pub use crate::message::Message;
#[doc(inline)]
pub use crate::transport::Transport;
