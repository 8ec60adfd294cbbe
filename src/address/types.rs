//! Representation of a mailbox

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Represents a mailbox: an email address with an optional display name.
///
/// No syntax validation is performed on either part, checking the address is
/// left to the caller or the transport. The only check applied, when the
/// address ends up in a [`Message`](crate::Message), is that neither part
/// contains a line break.
///
/// **NOTE**: Enable feature "serde" to be able to serialize/deserialize it using [serde](https://serde.rs/).
///
/// # Examples
///
/// You can create an `Address` from an address and an optional name:
///
/// ```
/// use courier::Address;
///
/// let address = Address::new("user@email.com", Some("John Smith".to_owned()));
/// assert_eq!(address.address(), "user@email.com");
/// assert_eq!(address.name(), Some("John Smith"));
/// assert_eq!(address.to_string(), "John Smith <user@email.com>");
/// ```
///
/// You can also create one from a bare string literal, without a name:
///
/// ```
/// use courier::Address;
///
/// let address = Address::from("user@email.com");
/// assert_eq!(address.name(), None);
/// assert_eq!(address.to_string(), "user@email.com");
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Complete address
    address: String,
    /// Display name
    #[cfg_attr(feature = "serde", serde(default))]
    name: Option<String>,
}

impl Address {
    /// Creates a new `Address` from an address and the name of the sender or
    /// recipient if there is one.
    pub fn new<A: Into<String>>(address: A, name: Option<String>) -> Self {
        Address {
            address: address.into(),
            name,
        }
    }

    /// Creates a new named `Address`.
    ///
    /// Shortcut for `Address::new(address, Some(name.into()))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::Address;
    ///
    /// let address = Address::named("Yuin", "yuin@domain.tld");
    /// assert_eq!(address.to_string(), "Yuin <yuin@domain.tld>");
    /// ```
    pub fn named<N: Into<String>, A: Into<String>>(name: N, address: A) -> Self {
        Address::new(address, Some(name.into()))
    }

    /// Gets the bare address, without the display name.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Gets the display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Gets the domain portion of the address, the part after the first `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier::Address;
    ///
    /// assert_eq!(Address::from("user@email.com").domain(), Some("email.com"));
    /// assert_eq!(Address::from("localuser").domain(), None);
    /// ```
    pub fn domain(&self) -> Option<&str> {
        self.address
            .find('@')
            .map(|at_start| &self.address[at_start + 1..])
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => f.write_str(&self.address),
        }
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Address::new(address, None)
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Address::new(address, None)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.address
    }
}
