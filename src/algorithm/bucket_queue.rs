use std::fmt::Debug;

use log::{debug, trace};
use num_traits::{Float, Zero};

use crate::algorithm::traits::relax_edges;
use crate::algorithm::{SearchStats, ShortestPath, ShortestPathAlgorithm};
use crate::data_structures::{BucketQueue, BucketQueueConfig};
use crate::graph::{Graph, NodeId};
use crate::Result;

/// Shortest path search over a [`BucketQueue`], a simplified delta-stepping.
///
/// There are no light/heavy edge phases. Nodes are expanded in approximate
/// distance order and re-queued whenever their distance improves, and the
/// queue is always drained completely, so the target's distance is only read
/// once nothing can improve it any more. Extraction order affects how much
/// work is repeated, not the final distances.
#[derive(Debug, Clone)]
pub struct BucketQueueSearch {
    config: BucketQueueConfig,
}

impl Default for BucketQueueSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketQueueSearch {
    pub const NAME: &'static str = "Bucket Queue (Delta-Stepping Approximation)";

    /// Creates a search with the default bucket width and an unbounded queue
    pub fn new() -> Self {
        BucketQueueSearch {
            config: BucketQueueConfig::default(),
        }
    }

    /// Creates a search with a custom queue configuration
    pub fn with_config(config: BucketQueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(BucketQueueSearch { config })
    }

    pub fn config(&self) -> &BucketQueueConfig {
        &self.config
    }
}

impl<W> ShortestPathAlgorithm<W> for BucketQueueSearch
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
        let mut queue = BucketQueue::from_validated(self.config);
        queue.add(start, 0.0);

        // Distance each node was last expanded at; expanding again at the same
        // distance cannot improve any neighbor.
        let mut expanded: Vec<Option<W>> = vec![None; graph.node_count()];

        while let Some(current) = queue.poll() {
            stats.polled += 1;

            let distance = graph.node(current).min_distance();
            if expanded[current.index()] == Some(distance) {
                stats.stale_skips += 1;
                continue;
            }
            expanded[current.index()] = Some(distance);
            trace!(
                "expanding node {} at {:?} from bucket {}",
                graph.node(current).id(),
                distance,
                queue.current_bucket()
            );

            stats.relaxations += relax_edges(graph, current, |neighbor, candidate| {
                queue.add(neighbor, candidate.to_f64().unwrap_or(f64::INFINITY));
            });
        }

        if queue.clamped_insertions() > 0 {
            debug!(
                "{}: {} insertions clamped into the last bucket",
                Self::NAME,
                queue.clamped_insertions()
            );
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
