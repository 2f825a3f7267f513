//! Cursor over a string of whitespace-separated prefix tokens.

use super::{is_delimiter, parse_token};
use crate::error::{PrefixError, Result};
use crate::models::Prefix;

/// Reads [`Prefix`] tokens from a string.
///
/// A failed read leaves the cursor exactly where it was, so the caller can try
/// another grammar on the same input.
#[derive(Debug, Clone)]
pub struct PrefixScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> PrefixScanner<'a> {
    pub fn new(src: &'a str) -> PrefixScanner<'a> {
        PrefixScanner { src, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread input.
    pub fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// True when only delimiters are left.
    pub fn is_empty(&self) -> bool {
        self.remaining().trim_start_matches(is_delimiter).is_empty()
    }

    /// Next token and the byte count up to its end, without moving the cursor.
    fn next_token(&self) -> Option<(&'a str, usize)> {
        let rest = self.remaining();
        let body = rest.trim_start_matches(is_delimiter);
        let len = body.find(is_delimiter).unwrap_or(body.len());
        if len == 0 {
            return None;
        }
        Some((&body[..len], rest.len() - body.len() + len))
    }

    /// Read the next token as a [`Prefix`].
    ///
    /// On failure returns [`PrefixError::ParseFailure`] and the cursor is not moved.
    pub fn read_prefix(&mut self) -> Result<Prefix> {
        let start = self.pos;
        let draft = self
            .next_token()
            .ok_or_else(|| PrefixError::invalid_argument("end of input"))
            .and_then(|(token, end)| parse_token(token).map(|prefix| (prefix, end)));

        match draft {
            Ok((prefix, consumed)) => {
                self.pos = start + consumed;
                log::trace!("read {prefix} at offset {start}");
                Ok(prefix)
            }
            Err(e) => {
                log::trace!("rollback to offset {start}: {e}");
                Err(PrefixError::parse_failure(start as u64, &e))
            }
        }
    }

    /// Read every remaining token, stopping at the first failure.
    pub fn read_all(&mut self) -> Result<Vec<Prefix>> {
        let mut prefixes = Vec::new();
        while !self.is_empty() {
            prefixes.push(self.read_prefix()?);
        }
        Ok(prefixes)
    }
}
