//! IPv4 network prefix: an address paired with a contiguous mask.
//!
//! A [`Prefix`] always keeps its host bits cleared and its mask contiguous.
//! The only mutation allowed on an existing value is [`Prefix::shrink_prefix`],
//! which can make the network larger (shorter prefix) but never smaller.

use super::Ipv4Raw;
use crate::error::{PrefixError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Mask bits for a prefix length already known to be `<= MAX_LENGTH`.
pub(crate) fn mask_bits(len: u8) -> u32 {
    debug_assert!(len <= MAX_LENGTH, "prefix length {len} out of range");
    // shl by 32 is None, which is exactly the /0 mask
    u32::MAX
        .checked_shl(u32::from(MAX_LENGTH - len))
        .unwrap_or(0)
}

/// Convert a prefix length to a subnet mask.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use netprefix::models::prefix_to_mask;
/// assert_eq!(prefix_to_mask(24).unwrap(), Ipv4Addr::new(255, 255, 255, 0));
/// assert_eq!(prefix_to_mask(0).unwrap(), Ipv4Addr::UNSPECIFIED);
/// ```
pub fn prefix_to_mask(len: u8) -> Result<Ipv4Addr> {
    if len > MAX_LENGTH {
        return Err(PrefixError::invalid_argument(format!(
            "prefix length {len} is too long"
        )));
    }
    Ok(Ipv4Addr::from(mask_bits(len)))
}

/// Number of set bits in `mask`.
///
/// For a malformed (non-contiguous) mask this is still the population count,
/// which is not a meaningful prefix length. [`Prefix`] constructors reject such masks.
pub fn mask_to_prefix(mask: Ipv4Addr) -> u8 {
    u32::from(mask).count_ones() as u8
}

/// True when `mask` is a run of ones followed only by zeros.
pub fn is_prefix_mask(mask: Ipv4Addr) -> bool {
    let bits = u32::from(mask);
    bits.leading_ones() + bits.trailing_zeros() == u32::from(MAX_LENGTH)
}

/// IPv4 network prefix (address + mask).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    addr: Ipv4Addr,
    mask: Ipv4Addr,
}

impl Prefix {
    /// Build a prefix from an address and a dotted mask.
    ///
    /// Host bits of `addr` are cleared. A mask whose ones are not contiguous
    /// is rejected with [`PrefixError::InvalidArgument`].
    pub fn from_parts(addr: Ipv4Addr, mask: Ipv4Addr) -> Result<Prefix> {
        if !is_prefix_mask(mask) {
            return Err(PrefixError::invalid_argument(format!(
                "{mask} is not a prefix mask"
            )));
        }
        Ok(Prefix {
            addr: Ipv4Addr::from(u32::from(addr) & u32::from(mask)),
            mask,
        })
    }

    /// Build a prefix from an address and a prefix length (`0..=32`).
    pub fn from_prefix_length(addr: Ipv4Addr, len: u8) -> Result<Prefix> {
        let mask = prefix_to_mask(len)?;
        Ok(Prefix {
            addr: Ipv4Addr::from(u32::from(addr) & u32::from(mask)),
            mask,
        })
    }

    /// Build a prefix from a raw network-order value.
    pub fn from_raw(raw: Ipv4Raw, len: u8) -> Result<Prefix> {
        Prefix::from_prefix_length(raw.into(), len)
    }

    /// Single host prefix (`/32`).
    pub fn host(addr: Ipv4Addr) -> Prefix {
        Prefix {
            addr,
            mask: Ipv4Addr::BROADCAST,
        }
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn mask(&self) -> Ipv4Addr {
        self.mask
    }

    /// Prefix length (number of leading ones in the mask).
    pub fn prefix(&self) -> u8 {
        mask_to_prefix(self.mask)
    }

    /// Lowest address of the network. Same as [`Prefix::addr`].
    pub fn network(&self) -> Ipv4Addr {
        self.addr
    }

    /// Highest (broadcast) address of the network.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !u32::from(self.mask))
    }

    /// Is the host `ip` a member of this network?
    pub fn contains_addr(&self, ip: Ipv4Addr) -> bool {
        Prefix::host(ip).is_included_in(self)
    }

    /// Is this network entirely contained in `other`?
    pub fn is_included_in(&self, other: &Prefix) -> bool {
        is_included(self, other)
    }

    /// Reduce the prefix length to `len`, clearing the newly freed host bits.
    ///
    /// Fails with [`PrefixError::InvalidState`] when `len` is longer than the
    /// current prefix. Callers sharing a value across threads must serialize this.
    pub fn shrink_prefix(&mut self, len: u8) -> Result<()> {
        let current = self.prefix();
        if len > current {
            return Err(PrefixError::InvalidState(format!(
                "prefix of {self} can only be decreased, not set to /{len}"
            )));
        }
        self.mask = Ipv4Addr::from(mask_bits(len));
        self.addr = Ipv4Addr::from(u32::from(self.addr) & mask_bits(len));
        Ok(())
    }

    /// Render as text, optionally led by a label and a space.
    pub fn show(&self, label: Option<&str>) -> String {
        match label {
            Some(label) => format!("{label} {self}"),
            None => self.to_string(),
        }
    }
}

/// Is the network `lhs` entirely contained in the network `rhs`?
///
/// A less specific network is never inside a more specific one. Otherwise both
/// addresses are compared at the length of `rhs`.
pub fn is_included(lhs: &Prefix, rhs: &Prefix) -> bool {
    let (lp, rp) = (lhs.prefix(), rhs.prefix());
    if lp < rp {
        return false;
    }
    let mask = mask_bits(rp);
    u32::from(lhs.addr) & mask == u32::from(rhs.addr) & mask
}

impl Default for Prefix {
    fn default() -> Self {
        Prefix {
            addr: Ipv4Addr::UNSPECIFIED,
            mask: Ipv4Addr::UNSPECIFIED,
        }
    }
}

impl From<Ipv4Addr> for Prefix {
    fn from(addr: Ipv4Addr) -> Self {
        Prefix::host(addr)
    }
}

impl From<Ipv4Raw> for Prefix {
    fn from(raw: Ipv4Raw) -> Self {
        Prefix::host(raw.into())
    }
}

// Shorter prefixes first, then by address value.
impl Ord for Prefix {
    fn cmp(&self, other: &Prefix) -> Ordering {
        self.prefix()
            .cmp(&other.prefix())
            .then_with(|| u32::from(self.addr).cmp(&u32::from(other.addr)))
    }
}

impl PartialOrd for Prefix {
    fn partial_cmp(&self, other: &Prefix) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix())
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    /// Parse `A.B.C.D/P` or `A.B.C.D/M.M.M.M`, optionally quoted.
    fn from_str(s: &str) -> Result<Prefix> {
        crate::parser::parse_token(s)
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::from_str(s.trim())
            .map_err(|e| de::Error::custom(format!("invalid prefix {s}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Prefix {
        s.parse().expect("Error parsing prefix")
    }

    #[test]
    fn test_prefix_to_mask() {
        assert_eq!(prefix_to_mask(0).expect("Error building mask"), Ipv4Addr::new(0, 0, 0, 0), "/0 mask");
        assert_eq!(prefix_to_mask(1).expect("Error building mask"), Ipv4Addr::new(128, 0, 0, 0), "/1 mask");
        assert_eq!(prefix_to_mask(8).expect("Error building mask"), Ipv4Addr::new(255, 0, 0, 0), "/8 mask");
        assert_eq!(prefix_to_mask(12).expect("Error building mask"), Ipv4Addr::new(255, 240, 0, 0), "/12 mask");
        assert_eq!(prefix_to_mask(24).expect("Error building mask"), Ipv4Addr::new(255, 255, 255, 0), "/24 mask");
        assert_eq!(prefix_to_mask(31).expect("Error building mask"), Ipv4Addr::new(255, 255, 255, 254), "/31 mask");
        assert_eq!(prefix_to_mask(32).expect("Error building mask"), Ipv4Addr::new(255, 255, 255, 255), "/32 mask");
        assert!(matches!(
            prefix_to_mask(33),
            Err(PrefixError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mask_prefix_inverse() {
        for len in 0..=MAX_LENGTH {
            let mask = prefix_to_mask(len).expect("Error building mask");
            assert_eq!(mask_to_prefix(mask), len, "mask {mask}");
            assert!(is_prefix_mask(mask), "mask {mask}");
        }
    }

    #[test]
    fn test_malformed_mask() {
        let mask = Ipv4Addr::new(255, 0, 255, 0);
        assert!(!is_prefix_mask(mask));
        assert_eq!(mask_to_prefix(mask), 16);
        let res = Prefix::from_parts(Ipv4Addr::new(10, 0, 0, 0), mask);
        assert!(matches!(res, Err(PrefixError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_prefix_length_clears_host_bits() {
        let net = Prefix::from_prefix_length(Ipv4Addr::new(192, 168, 10, 5), 24).expect("Error building prefix");
        assert_eq!(net.addr(), Ipv4Addr::new(192, 168, 10, 0), "host bits cleared");
        assert_eq!(net.prefix(), 24, "prefix length kept");
        assert!(Prefix::from_prefix_length(Ipv4Addr::LOCALHOST, 33).is_err());
    }

    #[test]
    fn test_from_parts() {
        let mask = prefix_to_mask(12).expect("Error building mask");
        let net = Prefix::from_parts(Ipv4Addr::new(172, 16, 0, 0), mask).expect("Error building prefix from mask");
        assert_eq!(net.to_string(), "172.16.0.0/12", "dotted mask renders as a length");

        let net = Prefix::from_parts(Ipv4Addr::new(172, 31, 7, 9), mask).expect("Error building prefix from mask");
        assert_eq!(net.addr(), Ipv4Addr::new(172, 16, 0, 0), "host bits cleared with a dotted mask");
    }

    #[test]
    fn test_default_and_host() {
        assert_eq!(Prefix::default().to_string(), "0.0.0.0/0", "default is the whole address space");
        let host = Prefix::from(Ipv4Addr::new(10, 1, 2, 3));
        assert_eq!(host.prefix(), 32, "host route length");
        assert_eq!(host.to_string(), "10.1.2.3/32", "host route text");
    }

    #[test]
    fn test_shrink_prefix() {
        let mut net = p("10.1.2.0/24");
        net.shrink_prefix(16).expect("Error shrinking prefix");
        assert_eq!(net, p("10.1.0.0/16"));

        net.shrink_prefix(16).expect("Error shrinking prefix");
        assert_eq!(net.prefix(), 16);

        let res = net.shrink_prefix(17);
        assert!(matches!(res, Err(PrefixError::InvalidState(_))));
        assert_eq!(net, p("10.1.0.0/16"), "failed shrink must not modify");

        net.shrink_prefix(0).expect("Error shrinking prefix");
        assert_eq!(net, Prefix::default());
    }

    #[test]
    fn test_broadcast_and_contains() {
        let net = p("192.168.1.0/24");
        assert_eq!(net.broadcast(), Ipv4Addr::new(192, 168, 1, 255), "last address");
        assert!(net.contains_addr(Ipv4Addr::new(192, 168, 1, 77)));
        assert!(!net.contains_addr(Ipv4Addr::new(192, 168, 2, 1)));
        assert_eq!(Prefix::default().broadcast(), Ipv4Addr::BROADCAST, "last address of /0");
    }

    #[test]
    fn test_prefix_cmp() {
        let ip1 = p("10.0.10.0/24");
        let ip2 = p("10.0.0.0/8");
        let ip3 = p("10.0.10.64/26");
        let ip4 = p("9.255.0.0/24");

        assert!(ip2 < ip1, "shorter prefix sorts first");
        assert!(ip1 < ip3);
        assert!(ip4 < ip1, "same length sorts by address");
        assert!(ip1 > ip4);
        assert!(ip1 >= ip1);
        assert!(ip1 <= ip1);
        assert!(ip2 < ip4, "/8 before any /24");
    }

    #[test]
    fn test_cmp_uses_numeric_address() {
        // 1.0.0.0 and 0.0.0.1 would swap if compared as little-endian words
        let a = p("0.0.0.1/32");
        let b = p("1.0.0.0/32");
        assert!(a < b);
    }

    #[test]
    fn test_is_included() {
        let sub = p("192.168.10.0/24");
        let sup = p("192.168.0.0/16");
        assert!(is_included(&sub, &sup));
        assert!(!is_included(&sup, &sub));
        assert!(is_included(&sub, &sub));
        assert!(is_included(&sup, &Prefix::default()));
        assert!(!is_included(&p("192.169.10.0/24"), &sup));
        assert!(!is_included(&p("192.168.11.0/24"), &sub));
    }

    #[test]
    fn test_show() {
        let net = p("10.0.0.0/8");
        assert_eq!(net.show(None), "10.0.0.0/8", "no label");
        assert_eq!(net.show(Some("net:")), "net: 10.0.0.0/8", "label prefixed");
    }

    #[test]
    fn test_serde() {
        let net = p("10.20.0.0/16");
        let json = serde_json::to_string(&net).expect("Error serializing prefix");
        assert_eq!(json, "\"10.20.0.0/16\"", "serialized as text");
        let back: Prefix = serde_json::from_str("\"10.20.30.40/255.255.0.0\"").expect("Error deserializing JSON");
        assert_eq!(back, net, "dotted mask deserializes to the same prefix");
        assert!(serde_json::from_str::<Prefix>("\"10.20.0.0\"").is_err());
    }
}
