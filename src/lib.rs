//! IPv4 network prefixes for topology tools.
//!
//! - [`models`] - the [`Prefix`] value type, raw addresses and the bucketed hash
//! - [`parser`] - token, cursor and stream parsing with rollback
//! - [`processing`] - sorting, nesting and supernet-bucketed lookup
//! - [`output`] - terminal and JSON rendering

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod parser;
pub mod processing;

use config::{Config, OutputFormat};
use output::LookupResult;
use processing::{build_topology, check_for_duplicate_prefixes, sort_prefixes, BucketMap};
use std::error::Error;

pub use error::{PrefixError, Result};
pub use models::{is_included, Ipv4Raw, Prefix, PrefixHash};

/// Read, sort and de-duplicate the configured input.
///
/// Duplicates in the input are logged as a warning and only one copy is kept.
pub fn get_sorted_prefixes(path: Option<&str>) -> std::result::Result<Vec<Prefix>, Box<dyn Error>> {
    let prefixes = input::read_prefix_file(path)?;
    if let Err(e) = check_for_duplicate_prefixes(&prefixes) {
        log::warn!("{e} in input, keeping one copy");
    }
    Ok(sort_prefixes(prefixes))
}

/// Answer address lookups from a [`BucketMap`] built over `prefixes`.
///
/// Prefixes shorter than `min_prefix` cannot be bucketed and are skipped with a warning.
pub fn lookup_addresses(
    prefixes: &[Prefix],
    min_prefix: u8,
    addresses: &[std::net::Ipv4Addr],
) -> std::result::Result<Vec<LookupResult>, Box<dyn Error>> {
    let mut map = BucketMap::new(PrefixHash::new(min_prefix)?);
    for prefix in prefixes {
        if let Err(e) = map.insert(*prefix, ()) {
            log::warn!("Skipping {prefix} for lookups: {e}");
        }
    }
    log::debug!("Bucketed {} of {} prefixes at /{min_prefix}", map.len(), prefixes.len());

    Ok(addresses
        .iter()
        .map(|addr| LookupResult {
            address: *addr,
            matches: map.lookup(*addr).into_iter().map(|(p, _)| *p).collect(),
        })
        .collect())
}

/// Run the tool end to end for `config`.
pub fn run(config: &Config) -> std::result::Result<(), Box<dyn Error>> {
    let prefixes = get_sorted_prefixes(config.input.as_deref())?;
    let topology = build_topology(&prefixes);
    let lookups = lookup_addresses(&prefixes, config.min_prefix, &config.lookups)?;

    match config.output {
        OutputFormat::Text => output::print_topology(&topology, &lookups),
        OutputFormat::Json => println!("{}", output::topology_report(&topology, &lookups)?),
    }
    Ok(())
}
