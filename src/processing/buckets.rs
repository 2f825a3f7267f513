//! Hash container grouping prefixes by supernet.
//!
//! Entries are stored under their [`PrefixHash`] key. With a non-zero minimum
//! prefix, every network containing an address sits in the same bucket as that
//! address, so [`BucketMap::lookup`] only has to look at one bucket.

use crate::error::Result;
use crate::models::{Prefix, PrefixHash, MAX_LENGTH};
use std::collections::HashMap;
use std::net::Ipv4Addr;

#[derive(Debug, Clone)]
pub struct BucketMap<V> {
    hasher: PrefixHash,
    buckets: HashMap<u32, Vec<(Prefix, V)>>,
    len: usize,
}

impl<V> BucketMap<V> {
    pub fn new(hasher: PrefixHash) -> BucketMap<V> {
        BucketMap {
            hasher,
            buckets: HashMap::new(),
            len: 0,
        }
    }

    pub fn hasher(&self) -> PrefixHash {
        self.hasher
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` for `prefix`, returning the value it replaced.
    ///
    /// Fails when `prefix` is shorter than the configured minimum.
    pub fn insert(&mut self, prefix: Prefix, value: V) -> Result<Option<V>> {
        let key = self.hasher.hash(&prefix)?;
        let bucket = self.buckets.entry(key).or_default();
        if let Some(slot) = bucket.iter_mut().find(|(p, _)| *p == prefix) {
            return Ok(Some(std::mem::replace(&mut slot.1, value)));
        }
        bucket.push((prefix, value));
        self.len += 1;
        Ok(None)
    }

    /// Exact match.
    pub fn get(&self, prefix: &Prefix) -> Option<&V> {
        let key = self.hasher.hash(prefix).ok()?;
        self.buckets
            .get(&key)?
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, prefix: &Prefix) -> Option<V> {
        let key = self.hasher.hash(prefix).ok()?;
        let bucket = self.buckets.get_mut(&key)?;
        let idx = bucket.iter().position(|(p, _)| p == prefix)?;
        let (_, value) = bucket.swap_remove(idx);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        Some(value)
    }

    /// All entries whose network contains `addr`, most specific first.
    pub fn lookup(&self, addr: Ipv4Addr) -> Vec<(&Prefix, &V)> {
        let host = Prefix::host(addr);
        let mut found: Vec<(&Prefix, &V)> = if self.hasher.min_prefix() > 0 {
            // a /32 is never shorter than the minimum
            self.hasher
                .hash(&host)
                .ok()
                .and_then(|key| self.buckets.get(&key))
                .into_iter()
                .flatten()
                .filter(|(p, _)| host.is_included_in(p))
                .map(|(p, v)| (p, v))
                .collect()
        } else {
            // exact-match keys: try the key of every possible length
            (0..=MAX_LENGTH)
                .filter_map(|len| {
                    let net = Prefix::from_prefix_length(addr, len).ok()?;
                    let key = self.hasher.hash(&net).ok()?;
                    Some((len, self.buckets.get(&key)?))
                })
                .flat_map(|(len, bucket)| {
                    bucket
                        .iter()
                        .filter(move |(p, _)| p.prefix() == len && host.is_included_in(p))
                })
                .map(|(p, v)| (p, v))
                .collect()
        };
        found.sort_by(|a, b| b.0.cmp(a.0));
        log::trace!("lookup {addr}: {} match(es)", found.len());
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &V)> {
        self.buckets.values().flatten().map(|(p, v)| (p, v))
    }
}
