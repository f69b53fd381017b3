use crate::graph::node::{Edge, Node, NodeId, NodeIndex};
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::collections::HashMap;
use std::fmt::Debug;

/// A directed graph holding all nodes in an arena, indexed by external id
#[derive(Debug, Clone)]
pub struct Graph<W = f64>
where
    W: Float + Zero + Debug + Copy,
{
    /// Nodes in first-reference order
    nodes: Vec<Node<W>>,

    /// External id -> arena position
    index: HashMap<NodeId, NodeIndex>,

    edge_count: usize,
}

impl<W> Default for Graph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for `nodes` nodes
    pub fn with_capacity(nodes: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Builds a graph from `(source, target, weight)` triples
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, W)>,
    {
        let mut graph = Graph::new();
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Returns the node for `id`, creating it on first reference
    pub fn add_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(Node::new(id));
        self.index.insert(id, idx);
        idx
    }

    /// Adds a directed edge, creating both endpoints if needed.
    ///
    /// Parallel edges are kept side by side. Self-loops, negative weights and
    /// non-finite weights are rejected before anything is created.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: W) -> Result<()> {
        if from == to {
            return Err(Error::SelfLoop(from));
        }
        if !weight.is_finite() {
            return Err(Error::NonFiniteWeight { from, to });
        }
        if weight < W::zero() {
            return Err(Error::NegativeWeight {
                from,
                to,
                weight: weight.to_f64().unwrap_or(f64::NAN),
            });
        }

        let source = self.add_node(from);
        let target = self.add_node(to);
        self.nodes[source.0].push_edge(Edge { target, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Looks up a node by external id without creating it
    pub fn get_node(&self, id: NodeId) -> Option<&Node<W>> {
        self.index.get(&id).map(|idx| &self.nodes[idx.0])
    }

    /// Arena position of `id`, if present
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// Returns the node stored at an arena position
    pub fn node(&self, idx: NodeIndex) -> &Node<W> {
        &self.nodes[idx.0]
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates nodes in first-reference order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<W>> + '_ {
        self.nodes.iter()
    }

    /// Restores every node's search state: infinite distance, no predecessor
    pub fn reset_graph(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    /// Lazily walks all edges as `(source, target, weight)` triples
    pub fn export(&self) -> ExportEdges<'_, W> {
        ExportEdges {
            graph: self,
            node: 0,
            edge: 0,
        }
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut Node<W> {
        &mut self.nodes[idx.0]
    }

    /// Copies out the edge at `position` of `idx`'s edge list
    pub(crate) fn edge_at(&self, idx: NodeIndex, position: usize) -> Option<Edge<W>> {
        self.nodes[idx.0].edges().get(position).copied()
    }
}

/// Lazy edge iterator returned by [`Graph::export`]
///
/// Yields nodes in first-reference order and, per node, edges in insertion
/// order. A fresh call to `export` starts over from the beginning.
#[derive(Debug, Clone)]
pub struct ExportEdges<'a, W>
where
    W: Float + Zero + Debug + Copy,
{
    graph: &'a Graph<W>,
    node: usize,
    edge: usize,
}

impl<'a, W> Iterator for ExportEdges<'a, W>
where
    W: Float + Zero + Debug + Copy,
{
    type Item = (NodeId, NodeId, W);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.graph.nodes.get(self.node) {
            if let Some(edge) = node.edges().get(self.edge) {
                self.edge += 1;
                let target = self.graph.node(edge.target()).id();
                return Some((node.id(), target, edge.weight()));
            }
            self.node += 1;
            self.edge = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_is_idempotent() {
        let mut graph: Graph<f64> = Graph::new();
        let a = graph.add_node(7);
        let b = graph.add_node(7);
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn rejected_edges_do_not_create_nodes() {
        let mut graph: Graph<f64> = Graph::new();
        assert!(graph.add_edge(1, 2, -1.0).is_err());
        assert!(graph.add_edge(1, 2, f64::NAN).is_err());
        assert!(graph.add_edge(3, 3, 1.0).is_err());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn edge_at_walks_insertion_order() {
        let mut graph: Graph<f64> = Graph::new();
        graph.add_edge(1, 2, 10.0).unwrap();
        graph.add_edge(1, 2, 3.0).unwrap();
        let idx = graph.index_of(1).unwrap();
        assert_eq!(graph.edge_at(idx, 0).map(|e| e.weight()), Some(10.0));
        assert_eq!(graph.edge_at(idx, 1).map(|e| e.weight()), Some(3.0));
        assert!(graph.edge_at(idx, 2).is_none());
    }
}
