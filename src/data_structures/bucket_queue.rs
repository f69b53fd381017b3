use std::collections::{BTreeMap, VecDeque};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::graph::NodeIndex;
use crate::{Error, Result};

/// Bucket width used when none is configured
pub const DEFAULT_DELTA: f64 = 2.0;

/// Tuning parameters for [`BucketQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketQueueConfig {
    /// Width of each distance bucket
    pub delta: f64,

    /// Highest usable bucket index + 1. Distances past `capacity * delta` are
    /// clamped into the last bucket. `None` lets the queue grow as needed.
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl Default for BucketQueueConfig {
    fn default() -> Self {
        BucketQueueConfig {
            delta: DEFAULT_DELTA,
            capacity: None,
        }
    }
}

impl BucketQueueConfig {
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(Error::InvalidDelta(self.delta));
        }
        if self.capacity == Some(0) {
            return Err(Error::InvalidCapacity);
        }
        Ok(())
    }
}

/// Number of consecutive buckets kept in the dense window
pub const WINDOW_BUCKETS: usize = 1 << 16;

/// Monotone-ish priority queue that files nodes into distance buckets of
/// width `delta`.
///
/// The bucket is picked once, from the distance passed to [`add`](Self::add);
/// a node whose distance later improves is simply added again, so one node can
/// sit in several buckets at once. [`poll`](Self::poll) hands out the tail of
/// the lowest non-empty bucket, which is only approximately the minimum: ties
/// and near-ties inside a bucket come out in reverse insertion order.
///
/// The `window` consecutive buckets starting at bucket number `base` live in a
/// deque and cost O(1) to reach. Buckets further out are kept sparsely in
/// `far`, keyed by bucket number, and move into the deque once the window
/// slides over them. Memory therefore follows the number of queued entries,
/// not the size of the distances.
#[derive(Debug)]
pub struct BucketQueue {
    delta: f64,
    capacity: Option<usize>,

    /// Dense buckets `base .. base + buckets.len()`, never longer than `window`
    buckets: VecDeque<Vec<NodeIndex>>,

    /// Non-empty buckets at or past `base + window`
    far: BTreeMap<usize, Vec<NodeIndex>>,

    /// Absolute bucket number of `buckets[0]`
    base: usize,

    window: usize,

    len: usize,

    clamped: usize,
}

impl BucketQueue {
    /// Creates an empty queue from a validated configuration
    pub fn new(config: BucketQueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: BucketQueueConfig) -> Self {
        BucketQueue {
            delta: config.delta,
            capacity: config.capacity,
            buckets: VecDeque::new(),
            far: BTreeMap::new(),
            base: 0,
            window: WINDOW_BUCKETS,
            len: 0,
            clamped: 0,
        }
    }

    /// Shorthand for an unbounded queue with bucket width `delta`
    pub fn with_delta(delta: f64) -> Result<Self> {
        Self::new(BucketQueueConfig::default().with_delta(delta))
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of queued entries, counting duplicates of the same node
    pub fn len(&self) -> usize {
        self.len
    }

    /// Absolute number of the bucket the next poll starts scanning from
    pub fn current_bucket(&self) -> usize {
        self.base
    }

    /// How many insertions were collapsed into the last bucket by `capacity`
    pub fn clamped_insertions(&self) -> usize {
        self.clamped
    }

    /// Files `node` under the bucket for `distance`.
    ///
    /// If that bucket lies behind the current one, the window slides back so
    /// the bucket is scanned again.
    pub fn add(&mut self, node: NodeIndex, distance: f64) {
        let bucket = self.bucket_for(distance);

        if self.len == 0 {
            self.buckets.clear();
            self.far.clear();
            self.base = bucket;
        } else if bucket < self.base {
            self.slide_back(bucket);
        }

        let offset = bucket - self.base;
        if offset < self.window {
            if offset >= self.buckets.len() {
                self.buckets.resize_with(offset + 1, Vec::new);
            }
            self.buckets[offset].push(node);
        } else {
            self.far.entry(bucket).or_default().push(node);
        }
        self.len += 1;
    }

    /// Removes and returns the most recently added node of the lowest
    /// non-empty bucket
    pub fn poll(&mut self) -> Option<NodeIndex> {
        if self.len == 0 {
            return None;
        }

        loop {
            while self.buckets.front().map_or(false, Vec::is_empty) {
                self.buckets.pop_front();
                self.base = self.base.saturating_add(1);
            }
            if self.buckets.is_empty() {
                // Nothing dense is left: jump straight to the next far bucket.
                let next = *self.far.keys().next()?;
                self.base = next;
            }
            self.pull_far_into_window();
            if self.buckets.front().map_or(false, |b| !b.is_empty()) {
                break;
            }
        }

        let node = self.buckets.front_mut()?.pop()?;
        self.len -= 1;
        Some(node)
    }

    /// Moves far buckets that the window now covers into the deque
    fn pull_far_into_window(&mut self) {
        // far keys never fall below `base`
        while let Some((&bucket, _)) = self.far.first_key_value() {
            if bucket - self.base >= self.window {
                break;
            }
            let Some((_, nodes)) = self.far.pop_first() else {
                break;
            };
            let offset = bucket - self.base;
            if offset >= self.buckets.len() {
                self.buckets.resize_with(offset + 1, Vec::new);
            }
            self.buckets[offset].extend(nodes);
        }
    }

    /// Re-anchors the window at `bucket`, which is below `base`
    fn slide_back(&mut self, bucket: usize) {
        let shift = self.base - bucket;
        if shift >= self.window {
            for (offset, nodes) in self.buckets.drain(..).enumerate() {
                if !nodes.is_empty() {
                    self.far.entry(self.base + offset).or_default().extend(nodes);
                }
            }
        } else {
            for _ in 0..shift {
                self.buckets.push_front(Vec::new());
            }
            while self.buckets.len() > self.window {
                let spilled = bucket + self.buckets.len() - 1;
                if let Some(nodes) = self.buckets.pop_back() {
                    if !nodes.is_empty() {
                        self.far.entry(spilled).or_default().extend(nodes);
                    }
                }
            }
        }
        self.base = bucket;
    }

    fn bucket_for(&mut self, distance: f64) -> usize {
        // `as` saturates: NaN -> 0, huge values -> usize::MAX
        let raw = (distance / self.delta).floor() as usize;
        match self.capacity {
            Some(capacity) if raw >= capacity => {
                if self.clamped == 0 {
                    warn!(
                        "distance {} exceeds bucket capacity {} (delta {}); clamping into last bucket",
                        distance, capacity, self.delta
                    );
                }
                self.clamped += 1;
                capacity - 1
            }
            _ => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex(i)
    }

    #[test]
    fn polls_lowest_bucket_first() {
        let mut queue = BucketQueue::with_delta(2.0).unwrap();
        queue.add(n(1), 9.0);
        queue.add(n(2), 1.0);
        queue.add(n(3), 5.5);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.poll(), Some(n(2)));
        assert_eq!(queue.poll(), Some(n(3)));
        assert_eq!(queue.poll(), Some(n(1)));
        assert_eq!(queue.poll(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn same_bucket_comes_out_in_reverse_insertion_order() {
        let mut queue = BucketQueue::with_delta(10.0).unwrap();
        queue.add(n(1), 1.0);
        queue.add(n(2), 9.0);
        queue.add(n(3), 4.0);

        assert_eq!(queue.poll(), Some(n(3)));
        assert_eq!(queue.poll(), Some(n(2)));
        assert_eq!(queue.poll(), Some(n(1)));
    }

    #[test]
    fn adding_behind_cursor_reopens_bucket() {
        let mut queue = BucketQueue::with_delta(1.0).unwrap();
        queue.add(n(1), 10.0);
        queue.add(n(2), 12.0);
        assert_eq!(queue.poll(), Some(n(1)));
        assert_eq!(queue.current_bucket(), 10);

        queue.add(n(3), 3.0);
        assert_eq!(queue.current_bucket(), 3);
        assert_eq!(queue.poll(), Some(n(3)));
        assert_eq!(queue.poll(), Some(n(2)));
        assert!(queue.poll().is_none());
    }

    #[test]
    fn same_node_may_be_queued_twice() {
        let mut queue = BucketQueue::with_delta(1.0).unwrap();
        queue.add(n(4), 8.0);
        queue.add(n(4), 2.0);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.poll(), Some(n(4)));
        assert_eq!(queue.poll(), Some(n(4)));
        assert!(queue.is_empty());
    }

    #[test]
    fn capacity_clamps_into_last_bucket() {
        let config = BucketQueueConfig::default()
            .with_delta(1.0)
            .with_capacity(Some(4));
        let mut queue = BucketQueue::new(config).unwrap();
        queue.add(n(1), 100.0);
        queue.add(n(2), 3.5);
        queue.add(n(3), 2.0);

        assert_eq!(queue.clamped_insertions(), 1);
        assert_eq!(queue.poll(), Some(n(3)));
        // both remaining entries share bucket 3
        assert_eq!(queue.poll(), Some(n(2)));
        assert_eq!(queue.poll(), Some(n(1)));
    }

    #[test]
    fn front_is_trimmed_as_queue_advances() {
        let mut queue = BucketQueue::with_delta(1.0).unwrap();
        for i in 0..100 {
            queue.add(n(i), i as f64);
        }
        for _ in 0..99 {
            queue.poll();
        }
        assert_eq!(queue.len(), 1);
        assert!(queue.buckets.len() <= 2);
        assert_eq!(queue.poll(), Some(n(99)));
    }

    #[test]
    fn rebases_after_draining() {
        let mut queue = BucketQueue::with_delta(1.0).unwrap();
        queue.add(n(1), 0.0);
        assert_eq!(queue.poll(), Some(n(1)));

        queue.add(n(2), 1e12);
        assert_eq!(queue.current_bucket(), 1_000_000_000_000);
        assert_eq!(queue.buckets.len(), 1);
        assert_eq!(queue.poll(), Some(n(2)));
    }

    #[test]
    fn distant_buckets_are_stored_sparsely() {
        let mut queue = BucketQueue::with_delta(2.0).unwrap();
        queue.add(n(1), 0.0);
        queue.add(n(2), 1e18);
        queue.add(n(3), 1e300);
        queue.add(n(4), 3.0);

        assert!(queue.buckets.len() <= 2);
        assert_eq!(queue.far.len(), 2);
        assert_eq!(queue.poll(), Some(n(1)));
        assert_eq!(queue.poll(), Some(n(4)));
        assert_eq!(queue.poll(), Some(n(2)));
        assert_eq!(queue.poll(), Some(n(3)));
        assert!(queue.poll().is_none());
    }

    #[test]
    fn sliding_back_spills_tail_into_far_buckets() {
        let mut queue = BucketQueue::with_delta(1.0).unwrap();
        queue.window = 4;
        queue.add(n(1), 10.0);
        queue.add(n(2), 13.0);
        queue.add(n(3), 8.0);

        // bucket 13 no longer fits in the window 8..12
        assert_eq!(queue.buckets.len(), 4);
        assert_eq!(queue.far.keys().copied().collect::<Vec<_>>(), vec![13]);

        queue.add(n(4), 1.0);
        assert!(queue.buckets.len() <= 4);
        assert_eq!(queue.poll(), Some(n(4)));
        assert_eq!(queue.poll(), Some(n(3)));
        assert_eq!(queue.poll(), Some(n(1)));
        assert_eq!(queue.poll(), Some(n(2)));
        assert!(queue.is_empty());
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            BucketQueue::with_delta(0.0).unwrap_err(),
            Error::InvalidDelta(0.0)
        );
        assert!(BucketQueue::with_delta(f64::NAN).is_err());
        let config = BucketQueueConfig::default().with_capacity(Some(0));
        assert_eq!(BucketQueue::new(config).unwrap_err(), Error::InvalidCapacity);
    }
}
