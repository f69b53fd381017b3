use num_traits::{Float, Zero};
use std::fmt::Debug;

/// External node identifier, as supplied by callers
pub type NodeId = usize;

/// Position of a node inside the graph's arena
///
/// Edges and predecessor links hold these instead of references, so the graph
/// stays the single owner of every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// Returns the raw arena position
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed weighted edge, owned by its source node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub(crate) target: NodeIndex,
    pub(crate) weight: W,
}

impl<W: Copy> Edge<W> {
    /// Arena index of the node this edge points to
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn weight(&self) -> W {
        self.weight
    }
}

/// A graph node with its outgoing edges and per-run search state
#[derive(Debug, Clone)]
pub struct Node<W>
where
    W: Float + Zero + Debug + Copy,
{
    id: NodeId,

    /// Outgoing edges in insertion order; parallel edges are kept
    edges: Vec<Edge<W>>,

    /// Best known distance from the current run's source
    min_distance: W,

    /// Predecessor on the best known path, used only for path reconstruction
    previous: Option<NodeIndex>,
}

impl<W> Node<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub(crate) fn new(id: NodeId) -> Self {
        Node {
            id,
            edges: Vec::new(),
            min_distance: W::infinity(),
            previous: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Outgoing edges in the order they were added
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    /// Best known distance from the last run's source (`+inf` if never reached)
    pub fn min_distance(&self) -> W {
        self.min_distance
    }

    /// Predecessor on the best known path, if any
    pub fn previous(&self) -> Option<NodeIndex> {
        self.previous
    }

    /// Returns true if the last run found a path to this node
    pub fn is_reached(&self) -> bool {
        self.min_distance.is_finite()
    }

    pub(crate) fn push_edge(&mut self, edge: Edge<W>) {
        self.edges.push(edge);
    }

    /// Records an improved distance. Distances never grow within a run.
    pub(crate) fn improve(&mut self, distance: W, previous: Option<NodeIndex>) {
        debug_assert!(distance <= self.min_distance);
        self.min_distance = distance;
        self.previous = previous;
    }

    pub(crate) fn reset(&mut self) {
        self.min_distance = W::infinity();
        self.previous = None;
    }
}
