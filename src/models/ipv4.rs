//! Raw IPv4 value held in network byte order.
//!
//! [`Ipv4Raw`] is the plain 32-bit address as read off the wire. It has no mask;
//! turn it into a network with [`Ipv4Raw::to_prefix`] or `Prefix::from`.

use super::Prefix;
use crate::error::Result;
use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv4Addr;

/// 32-bit big-endian IPv4 value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ipv4Raw {
    octets: [u8; 4],
}

impl Ipv4Raw {
    pub const fn from_be_bytes(octets: [u8; 4]) -> Ipv4Raw {
        Ipv4Raw { octets }
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.octets
    }

    /// Numeric value in host order.
    pub const fn value(self) -> u32 {
        u32::from_be_bytes(self.octets)
    }

    /// True for `0.0.0.0`.
    pub const fn is_unspecified(self) -> bool {
        self.value() == 0
    }

    /// Network of length `len` containing this address.
    pub fn to_prefix(self, len: u8) -> Result<Prefix> {
        Prefix::from_raw(self, len)
    }

    pub fn show(&self, label: Option<&str>) -> String {
        match label {
            Some(label) => format!("{label} {self}"),
            None => self.to_string(),
        }
    }
}

impl From<u32> for Ipv4Raw {
    fn from(value: u32) -> Self {
        Ipv4Raw {
            octets: value.to_be_bytes(),
        }
    }
}

impl From<Ipv4Addr> for Ipv4Raw {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Raw {
            octets: addr.octets(),
        }
    }
}

impl From<Ipv4Raw> for Ipv4Addr {
    fn from(raw: Ipv4Raw) -> Self {
        Ipv4Addr::from(raw.octets)
    }
}

impl Ord for Ipv4Raw {
    fn cmp(&self, other: &Ipv4Raw) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for Ipv4Raw {
    fn partial_cmp(&self, other: &Ipv4Raw) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ipv4Raw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Ipv4Addr::from(*self), f)
    }
}
