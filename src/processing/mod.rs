//! Prefix collection processing.
//!
//! - [`dedup`] - sorting and duplicate checks
//! - [`topology`] - nesting networks by inclusion
//! - [`buckets`] - hash container keyed by supernet

mod buckets;
mod dedup;
mod topology;

// Re-export public functions
pub use buckets::BucketMap;
pub use dedup::{check_for_duplicate_prefixes, sort_prefixes};
pub use topology::{build_topology, Topology, TopologyNode};
