//! Email addresses

mod envelope;
mod types;

pub use self::{envelope::Envelope, types::Address};
