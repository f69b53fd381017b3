use crate::algorithm::{Algorithm, ShortestPath};
use crate::graph::node::NodeId;
use crate::graph::store::Graph;
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard};

/// A graph shared between callers with a single-writer discipline
///
/// Every search mutates per-node state, so a run holds the lock from reset to
/// path reconstruction. Concurrent callers are serialized, never interleaved.
#[derive(Debug, Default)]
pub struct SharedGraph<W = f64>
where
    W: Float + Zero + Debug + Copy,
{
    inner: Mutex<Graph<W>>,
}

impl<W> SharedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn new(graph: Graph<W>) -> Self {
        SharedGraph {
            inner: Mutex::new(graph),
        }
    }

    /// Runs one search with exclusive access to the graph
    pub fn find_shortest_path(
        &self,
        algorithm: Algorithm,
        source: NodeId,
        target: NodeId,
    ) -> Result<ShortestPath<W>> {
        let mut graph = self.lock()?;
        Ok(algorithm.find_shortest_path(&mut graph, source, target))
    }

    /// Swaps in a new graph and returns the previous one
    pub fn replace(&self, graph: Graph<W>) -> Result<Graph<W>> {
        let mut current = self.lock()?;
        Ok(std::mem::replace(&mut *current, graph))
    }

    /// Read-only access to the graph while holding the lock
    pub fn with_graph<R>(&self, f: impl FnOnce(&Graph<W>) -> R) -> Result<R> {
        let graph = self.lock()?;
        Ok(f(&graph))
    }

    pub fn into_inner(self) -> Result<Graph<W>> {
        self.inner.into_inner().map_err(|_| Error::GraphUnavailable)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Graph<W>>> {
        self.inner.lock().map_err(|_| Error::GraphUnavailable)
    }
}

impl<W> From<Graph<W>> for SharedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn from(graph: Graph<W>) -> Self {
        SharedGraph::new(graph)
    }
}
