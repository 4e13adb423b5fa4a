//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use std::fmt;

/// A storage node address as handed to us by the dashboard (`host` or `host:port`).
///
/// Only the bare IP matters for geolocation; the port is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeAddress {
    bare_ip: String,
}

impl NodeAddress {
    /// Parse an address string.
    ///
    /// # Examples
    /// ```
    /// use node_geo::NodeAddress;
    ///
    /// assert_eq!(NodeAddress::parse("10.0.0.1:6000").bare_ip(), "10.0.0.1");
    /// assert_eq!(NodeAddress::parse("[2001:db8::1]:9001").bare_ip(), "2001:db8::1");
    /// ```
    pub fn parse(address: &str) -> Self {
        Self {
            bare_ip: bare_ip(address).to_string(),
        }
    }

    /// Host portion with any trailing `:port` removed.
    pub fn bare_ip(&self) -> &str {
        &self.bare_ip
    }

    /// Whether there is anything to look up.
    pub fn is_empty(&self) -> bool {
        self.bare_ip.is_empty()
    }

    pub fn into_bare_ip(self) -> String {
        self.bare_ip
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bare_ip)
    }
}

/// Strip the port from an address, borrowing from the input.
///
/// Bracketed IPv6 (`[addr]:port`) yields the text inside the brackets;
/// everything else is cut at the first `:`.
pub fn bare_ip(address: &str) -> &str {
    let address = address.trim();

    if let Some(rest) = address.strip_prefix('[') {
        return match rest.find(']') {
            Some(end) => &rest[..end],
            None => rest,
        };
    }

    match address.find(':') {
        Some(idx) => &address[..idx],
        None => address,
    }
}
