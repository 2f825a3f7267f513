//! Output formatting for prefix topologies.
//!
//! - [`json`] - JSON report
//! - [`terminal`] - Terminal output with colors

mod json;
mod terminal;

use crate::models::Prefix;
use serde::Serialize;
use std::net::Ipv4Addr;

pub use json::{topology_report, topology_report_at};
pub use terminal::{format_field, print_topology, render_lookups, render_tree};

/// Networks containing a looked-up address, most specific first.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub address: Ipv4Addr,
    pub matches: Vec<Prefix>,
}
