//! JSON report output.

use super::LookupResult;
use crate::processing::{Topology, TopologyNode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize, Debug)]
struct Report<'a> {
    generated: String,
    count: usize,
    networks: &'a [TopologyNode],
    lookups: &'a [LookupResult],
}

/// Pretty JSON report of the topology and lookups, stamped with the current time.
pub fn topology_report(
    topo: &Topology,
    lookups: &[LookupResult],
) -> Result<String, Box<dyn Error>> {
    topology_report_at(topo, lookups, Utc::now())
}

pub fn topology_report_at(
    topo: &Topology,
    lookups: &[LookupResult],
    generated: DateTime<Utc>,
) -> Result<String, Box<dyn Error>> {
    let report = Report {
        generated: generated.to_rfc3339(),
        count: topo.len(),
        networks: &topo.nodes,
        lookups,
    };
    serde_json::to_string_pretty(&report).map_err(|e| format!("Error serializing JSON: {e}").into())
}
