//! Network nesting.
//!
//! Places every prefix under the most specific other prefix that includes it.

use crate::models::{is_included, Prefix};
use serde::Serialize;

/// One network in the nesting tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyNode {
    pub prefix: Prefix,
    /// Most specific network containing this one, if any.
    pub parent: Option<Prefix>,
    /// Number of ancestors (roots are 0).
    pub depth: usize,
}

/// Prefixes arranged by inclusion, sorted shortest prefix first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
}

impl Topology {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &TopologyNode> {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }

    pub fn children<'a>(&'a self, parent: &'a Prefix) -> impl Iterator<Item = &'a TopologyNode> {
        self.nodes
            .iter()
            .filter(move |n| n.parent.as_ref() == Some(parent))
    }

    pub fn get(&self, prefix: &Prefix) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.prefix == *prefix)
    }

    /// Nodes in depth-first order, children in ascending prefix order.
    pub fn depth_first(&self) -> Vec<&TopologyNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<&TopologyNode> = self.roots().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut kids: Vec<&TopologyNode> = self.children(&node.prefix).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }
}

/// Build the nesting tree. Duplicates are kept once.
pub fn build_topology(prefixes: &[Prefix]) -> Topology {
    let sorted = super::sort_prefixes(prefixes.to_vec());
    let mut nodes: Vec<TopologyNode> = Vec::with_capacity(sorted.len());

    for prefix in sorted {
        // every candidate contains `prefix`; the longest one is the closest parent
        let parent = nodes
            .iter()
            .filter(|n| n.prefix != prefix && is_included(&prefix, &n.prefix))
            .max_by(|a, b| a.prefix.cmp(&b.prefix));
        let (parent, depth) = match parent {
            Some(p) => (Some(p.prefix), p.depth + 1),
            None => (None, 0),
        };
        log::trace!("nest {prefix} under {parent:?} at depth {depth}");
        nodes.push(TopologyNode {
            prefix,
            parent,
            depth,
        });
    }

    Topology { nodes }
}
