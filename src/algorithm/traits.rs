use std::fmt::{self, Debug, Display};

use log::warn;
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::graph::{Graph, NodeId, NodeIndex};

/// Work counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Entries taken off the priority structure, stale ones included
    pub polled: usize,

    /// Edge relaxations that improved a distance
    pub relaxations: usize,

    /// Entries taken off the priority structure but discarded as outdated,
    /// because the node's distance changed or it was already expanded at it
    pub stale_skips: usize,
}

/// Outcome of a source/target query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath<W> {
    /// Node ids from source to target inclusive; empty when there is no path
    pub nodes: Vec<NodeId>,

    /// Settled distance of the last node, `None` when `nodes` is empty
    pub total_distance: Option<W>,

    /// Human-readable name of the strategy that produced this result
    pub algorithm: &'static str,

    pub stats: SearchStats,
}

impl<W> ShortestPath<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub(crate) fn empty(algorithm: &'static str, stats: SearchStats) -> Self {
        ShortestPath {
            nodes: Vec::new(),
            total_distance: None,
            algorithm,
            stats,
        }
    }

    /// Reads the finished search state of `graph` into a result
    pub(crate) fn from_search(
        graph: &Graph<W>,
        source: NodeIndex,
        target: NodeIndex,
        algorithm: &'static str,
        stats: SearchStats,
    ) -> Self {
        let nodes = reconstruct_path(graph, source, target);
        let total_distance = if nodes.is_empty() {
            None
        } else {
            Some(graph.node(target).min_distance())
        };
        ShortestPath {
            nodes,
            total_distance,
            algorithm,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the path
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<W> Display for ShortestPath<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return f.write_str("no path");
        }
        for (i, id) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

/// Trait for shortest path strategies
pub trait ShortestPathAlgorithm<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Finds a shortest path from `source` to `target`.
    ///
    /// Resets the graph's search state first, so runs on the same graph are
    /// independent. Unknown ids or an unreachable target give an empty path.
    fn find_shortest_path(
        &self,
        graph: &mut Graph<W>,
        source: NodeId,
        target: NodeId,
    ) -> ShortestPath<W>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}

/// Relaxes every outgoing edge of `node` against its current distance.
///
/// `on_improve` is called with each neighbor whose distance dropped, after the
/// neighbor's distance and predecessor have been updated. Parallel edges are
/// relaxed one by one, so the lightest of them wins.
pub(crate) fn relax_edges<W, F>(graph: &mut Graph<W>, node: NodeIndex, mut on_improve: F) -> usize
where
    W: Float + Zero + Debug + Copy,
    F: FnMut(NodeIndex, W),
{
    let base = graph.node(node).min_distance();
    let mut improved = 0;
    let mut position = 0;

    while let Some(edge) = graph.edge_at(node, position) {
        position += 1;
        let candidate = base + edge.weight();
        let neighbor = graph.node_mut(edge.target());
        if candidate < neighbor.min_distance() {
            neighbor.improve(candidate, Some(node));
            improved += 1;
            on_improve(edge.target(), candidate);
        }
    }
    improved
}

/// Walks predecessor links back from `target` and returns ids source-first.
///
/// Returns an empty path when the target was never reached or the chain does
/// not lead back to `source`.
pub(crate) fn reconstruct_path<W>(graph: &Graph<W>, source: NodeIndex, target: NodeIndex) -> Vec<NodeId>
where
    W: Float + Zero + Debug + Copy,
{
    if !graph.node(target).is_reached() {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(idx) = current {
        path.push(graph.node(idx).id());
        if path.len() > graph.node_count() {
            warn!(
                "predecessor chain from node {} is longer than the graph, dropping path",
                graph.node(target).id()
            );
            return Vec::new();
        }
        current = graph.node(idx).previous();
    }

    if path.last() != Some(&graph.node(source).id()) {
        warn!(
            "predecessor chain from node {} does not reach source {}",
            graph.node(target).id(),
            graph.node(source).id()
        );
        return Vec::new();
    }

    path.reverse();
    path
}
