use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use num_traits::Float;
use ordered_float::OrderedFloat;

use crate::graph::NodeIndex;

/// Binary min-heap of `(node, distance)` entries for Dijkstra.
///
/// Keys cannot be decreased in place; callers push a fresh entry and treat
/// older entries for the same node as stale when they surface.
#[derive(Debug)]
pub struct DistanceHeap<W>
where
    W: Float + Debug,
{
    heap: BinaryHeap<Reverse<(OrderedFloat<W>, NodeIndex)>>,
}

impl<W> Default for DistanceHeap<W>
where
    W: Float + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DistanceHeap<W>
where
    W: Float + Debug,
{
    pub fn new() -> Self {
        DistanceHeap {
            heap: BinaryHeap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, node: NodeIndex, distance: W) {
        self.heap.push(Reverse((OrderedFloat(distance), node)));
    }

    /// Removes the entry with the smallest distance; ties go to the lower index
    pub fn pop(&mut self) -> Option<(NodeIndex, W)> {
        self.heap
            .pop()
            .map(|Reverse((distance, node))| (node, distance.into_inner()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_distance() {
        let mut heap = DistanceHeap::new();
        heap.push(NodeIndex(0), 4.0);
        heap.push(NodeIndex(1), 1.5);
        heap.push(NodeIndex(2), 3.0);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.pop(), Some((NodeIndex(1), 1.5)));
        assert_eq!(heap.pop(), Some((NodeIndex(2), 3.0)));
        assert_eq!(heap.pop(), Some((NodeIndex(0), 4.0)));
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_distances_prefer_lower_index() {
        let mut heap = DistanceHeap::new();
        heap.push(NodeIndex(5), 2.0);
        heap.push(NodeIndex(3), 2.0);
        assert_eq!(heap.pop(), Some((NodeIndex(3), 2.0)));
        assert_eq!(heap.len(), 1);
    }
}
