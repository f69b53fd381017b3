use std::fmt::Debug;

use log::{debug, trace};
use num_traits::{Float, Zero};

use crate::algorithm::traits::relax_edges;
use crate::algorithm::{SearchStats, ShortestPath, ShortestPathAlgorithm};
use crate::data_structures::DistanceHeap;
use crate::graph::{Graph, NodeId};

/// Classic Dijkstra's algorithm driven by a binary heap
#[derive(Debug, Clone)]
pub struct Dijkstra {
    /// Stop as soon as the target is extracted
    early_exit: bool,
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Dijkstra {
    pub const NAME: &'static str = "Standard Dijkstra (Binary Heap)";

    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra { early_exit: true }
    }

    /// Enable or disable stopping once the target is settled
    pub fn with_early_exit(mut self, enabled: bool) -> Self {
        self.early_exit = enabled;
        self
    }
}

impl<W> ShortestPathAlgorithm<W> for Dijkstra
where
    W: Float + Zero + Debug + Copy,
{
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn find_shortest_path(
        &self,
        graph: &mut Graph<W>,
        source: NodeId,
        target: NodeId,
    ) -> ShortestPath<W> {
        graph.reset_graph();
        let mut stats = SearchStats::default();

        let (Some(start), Some(end)) = (graph.index_of(source), graph.index_of(target)) else {
            debug!("{}: node {} or {} not in graph", Self::NAME, source, target);
            return ShortestPath::empty(Self::NAME, stats);
        };

        graph.node_mut(start).improve(W::zero(), None);
        let mut queue = DistanceHeap::new();
        queue.push(start, W::zero());

        while let Some((current, distance)) = queue.pop() {
            stats.polled += 1;

            // A shorter entry for this node was pushed after this one
            if distance > graph.node(current).min_distance() {
                stats.stale_skips += 1;
                continue;
            }
            trace!("settled node {} at {:?}", graph.node(current).id(), distance);

            if self.early_exit && current == end {
                break;
            }

            stats.relaxations += relax_edges(graph, current, |neighbor, candidate| {
                queue.push(neighbor, candidate);
            });
        }

        let path = ShortestPath::from_search(graph, start, end, Self::NAME, stats);
        debug!(
            "{}: {} -> {} found {} nodes, distance {:?}, {:?}",
            Self::NAME,
            source,
            target,
            path.len(),
            path.total_distance,
            stats
        );
        path
    }
}
