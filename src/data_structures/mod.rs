pub mod bucket_queue;
pub mod priority_queue;

pub use bucket_queue::{BucketQueue, BucketQueueConfig};
pub use priority_queue::DistanceHeap;
