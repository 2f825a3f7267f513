//! Domain models for IPv4 network prefixes.
//!
//! - [`Prefix`] - network address with a contiguous mask
//! - [`Ipv4Raw`] - raw network-order address value
//! - [`PrefixHash`] - hash functor bucketing prefixes by a minimum length

mod hash;
mod ipv4;
mod prefix;

// Re-export public types
pub use hash::PrefixHash;
pub use ipv4::Ipv4Raw;
pub use prefix::{
    is_included, is_prefix_mask, mask_to_prefix, prefix_to_mask, Prefix, MAX_LENGTH,
};
