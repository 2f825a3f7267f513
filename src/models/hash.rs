//! Prefix-bucketed hash.
//!
//! [`PrefixHash`] truncates an address to a configured minimum prefix length
//! before using it as a key, so every network at least that specific lands in
//! the bucket of its supernet. With `min_prefix = 0` each value is keyed on its
//! own length, which is plain exact-match hashing.

use super::prefix::{mask_bits, MAX_LENGTH};
use super::Prefix;
use crate::error::{PrefixError, Result};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PrefixHash {
    min_prefix: u8,
}

impl PrefixHash {
    pub fn new(min_prefix: u8) -> Result<PrefixHash> {
        if min_prefix > MAX_LENGTH {
            return Err(PrefixError::invalid_argument(format!(
                "minimum prefix {min_prefix} is too long"
            )));
        }
        Ok(PrefixHash { min_prefix })
    }

    pub fn min_prefix(&self) -> u8 {
        self.min_prefix
    }

    /// Bucket key of `value`.
    ///
    /// `value` must be at least as specific as the configured minimum. A shorter
    /// value is refused with [`PrefixError::InvalidArgument`] instead of being
    /// keyed into the wrong bucket.
    pub fn hash(&self, value: &Prefix) -> Result<u32> {
        let len = if self.min_prefix == 0 {
            value.prefix()
        } else {
            self.min_prefix
        };
        if value.prefix() < len {
            return Err(PrefixError::invalid_argument(format!(
                "{value} is shorter than the minimum hashed prefix /{len}"
            )));
        }
        Ok(u32::from(value.addr()) & mask_bits(len))
    }
}
