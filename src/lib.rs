//! Delta Route - in-memory single-source shortest paths
//!
//! This library holds a weighted directed graph in memory and answers
//! source/target shortest path queries with one of two interchangeable
//! strategies: classic Dijkstra driven by a binary heap, and a bucket-queue
//! search that groups tentative distances into buckets of width `delta`
//! (a simplified delta-stepping).
//!
//! ```
//! use delta_route::{build_graph, find_shortest_path, Algorithm};
//!
//! let mut graph = build_graph(vec![(1, 2, 10.0), (1, 3, 5.0), (3, 2, 2.0)]).unwrap();
//! let path = find_shortest_path(&mut graph, 1, 2, Algorithm::Dijkstra);
//! assert_eq!(path.nodes, vec![1, 3, 2]);
//! assert_eq!(path.total_distance, Some(7.0));
//! ```

pub mod algorithm;
pub mod data_structures;
pub mod graph;

use num_traits::{Float, Zero};
use std::fmt::Debug;

pub use algorithm::{
    bucket_queue::BucketQueueSearch, dijkstra::Dijkstra, Algorithm, SearchStats, ShortestPath,
    ShortestPathAlgorithm,
};
pub use data_structures::{BucketQueue, BucketQueueConfig};
/// Re-export main types for convenient use
pub use graph::{Edge, ExportEdges, Graph, Node, NodeId, NodeIndex, SharedGraph};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Negative edge weight {weight} on edge {from} -> {to}")]
    NegativeWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("Non-finite edge weight on edge {from} -> {to}")]
    NonFiniteWeight { from: NodeId, to: NodeId },

    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("Bucket width must be finite and positive, got {0}")]
    InvalidDelta(f64),

    #[error("Bucket capacity must be at least one bucket")]
    InvalidCapacity,

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Shared graph is unavailable: a previous run panicked while holding it")]
    GraphUnavailable,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Builds a graph from `(source, target, weight)` triples.
///
/// Stops at the first invalid triple and returns its error.
pub fn build_graph<W, I>(edges: I) -> Result<Graph<W>>
where
    W: Float + Zero + Debug + Copy,
    I: IntoIterator<Item = (NodeId, NodeId, W)>,
{
    Graph::from_edges(edges)
}

/// Runs the selected strategy between `source` and `target`.
///
/// Missing identifiers and unreachable targets produce an empty path.
pub fn find_shortest_path<W>(
    graph: &mut Graph<W>,
    source: NodeId,
    target: NodeId,
    algorithm: Algorithm,
) -> ShortestPath<W>
where
    W: Float + Zero + Debug + Copy,
{
    algorithm.find_shortest_path(graph, source, target)
}

/// Lazily walks every edge of the graph as `(source, target, weight)`.
pub fn export_graph<W>(graph: &Graph<W>) -> ExportEdges<'_, W>
where
    W: Float + Zero + Debug + Copy,
{
    graph.export()
}
