//! Terminal output.
//!
//! Renders the nesting tree and lookup answers as aligned, optionally coloured text.

use super::LookupResult;
use crate::processing::{Topology, TopologyNode};
use colored::Colorize;

/// Indent per nesting level.
const INDENT: usize = 2;

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

fn tree_label(node: &TopologyNode) -> String {
    format!("{:indent$}{}", "", node.prefix, indent = node.depth * INDENT)
}

/// Render the topology one network per line, children indented under parents.
pub fn render_tree(topo: &Topology, color: bool) -> String {
    let nodes = topo.depth_first();
    let width = nodes
        .iter()
        .map(|n| tree_label(n).len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for node in nodes {
        let label = format!("{:<width$}", tree_label(node));
        let label = match (color, node.parent.is_none()) {
            (false, _) => label,
            (true, true) => label.green().bold().to_string(),
            (true, false) => label.cyan().to_string(),
        };
        let children = topo.children(&node.prefix).count();
        out.push_str(&format!(
            "{label}  mask {mask:<15}  last {last:<15}  subnets {children}\n",
            mask = node.prefix.mask(),
            last = node.prefix.broadcast(),
        ));
    }
    out
}

/// Render lookup answers, most specific match first.
pub fn render_lookups(lookups: &[LookupResult], color: bool) -> String {
    let mut out = String::new();
    for lookup in lookups {
        let matches = if lookup.matches.is_empty() {
            let none = "no match".to_string();
            if color {
                none.red().to_string()
            } else {
                none
            }
        } else {
            lookup
                .matches
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<String>>()
                .join(" < ")
        };
        out.push_str(&format!(
            "{addr} -> {matches}\n",
            addr = format_field(lookup.address, 17)
        ));
    }
    out
}

/// Print topology and lookups to stdout.
pub fn print_topology(topo: &Topology, lookups: &[LookupResult]) {
    log::info!("Topology: {} network(s), {} root(s)", topo.len(), topo.roots().count());
    print!("{}", render_tree(topo, true));
    if !lookups.is_empty() {
        println!();
        print!("{}", render_lookups(lookups, true));
    }
}
