//! Text parsing for [`Prefix`] values.
//!
//! Grammar of one token: `["']? A.B.C.D '/' (M.M.M.M | 0..32) ["']?`.
//! - [`parse_token`] - parse a single token
//! - [`PrefixScanner`] - read tokens from a `&str` with rollback on failure
//! - [`read_prefix`] - read a token from a seekable stream with rollback on failure

mod scanner;
mod stream;

pub use scanner::PrefixScanner;
pub use stream::read_prefix;

use crate::error::{PrefixError, Result};
use crate::models::{Prefix, MAX_LENGTH};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#"^(?:'([^']*)'|"([^"]*)")$"#).expect("Invalid Regex?");
}

/// Token separator shared by [`PrefixScanner`] and [`read_prefix`]: space, `\t`, `\n`,
/// `\x0B`, `\x0C` and `\r`. Other Unicode spaces are part of a token.
pub fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Remove one pair of matching single or double quotes around `token`.
pub fn strip_quotes(token: &str) -> Result<&str> {
    if !token.starts_with(['\'', '"']) {
        return Ok(token);
    }
    QUOTED
        .captures(token)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str())
        .ok_or_else(|| PrefixError::invalid_argument(format!("unbalanced quotes in {token}")))
}

/// Parse a decimal prefix length. Only ASCII digits are accepted.
fn parse_length(s: &str) -> Result<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PrefixError::invalid_argument(format!(
            "invalid prefix length {s:?}"
        )));
    }
    // digits only, so a parse error can only be overflow
    let len: u32 = s
        .parse()
        .map_err(|_| PrefixError::invalid_argument(format!("prefix length {s} is too long")))?;
    if len > u32::from(MAX_LENGTH) {
        return Err(PrefixError::invalid_argument(format!(
            "prefix length {len} is too long"
        )));
    }
    Ok(len as u8)
}

/// Parse one `address/mask` token into a [`Prefix`].
///
/// The mask is tried as a dotted address first, then as a prefix length.
///
/// # Examples
/// ```
/// use netprefix::parser::parse_token;
/// let net = parse_token("'10.1.2.3/255.255.0.0'").unwrap();
/// assert_eq!(net.to_string(), "10.1.0.0/16");
/// ```
pub fn parse_token(token: &str) -> Result<Prefix> {
    let body = strip_quotes(token)?;
    let (addr_s, mask_s) = body
        .split_once('/')
        .ok_or_else(|| PrefixError::invalid_argument(format!("missing '/' in {token}")))?;

    let addr: Ipv4Addr = addr_s
        .parse()
        .map_err(|_| PrefixError::invalid_argument(format!("invalid address {addr_s:?}")))?;

    match mask_s.parse::<Ipv4Addr>() {
        Ok(mask) => Prefix::from_parts(addr, mask),
        Err(_) => Prefix::from_prefix_length(addr, parse_length(mask_s)?),
    }
}
