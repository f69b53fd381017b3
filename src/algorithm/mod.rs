pub mod bucket_queue;
pub mod dijkstra;
pub mod traits;

pub use traits::{SearchStats, ShortestPath, ShortestPathAlgorithm};

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};
use crate::Error;
use bucket_queue::BucketQueueSearch;
use dijkstra::Dijkstra;

/// Selects one of the available strategies at a call boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Binary-heap Dijkstra with early exit
    #[default]
    Dijkstra,
    /// Bucket-queue search with the default bucket width
    BucketQueue,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::BucketQueue];

    /// Runs the default configuration of this strategy
    pub fn find_shortest_path<W>(
        self,
        graph: &mut Graph<W>,
        source: NodeId,
        target: NodeId,
    ) -> ShortestPath<W>
    where
        W: Float + Zero + Debug + Copy,
    {
        match self {
            Algorithm::Dijkstra => Dijkstra::new().find_shortest_path(graph, source, target),
            Algorithm::BucketQueue => {
                BucketQueueSearch::new().find_shortest_path(graph, source, target)
            }
        }
    }

    /// Human-readable name reported in results
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => Dijkstra::NAME,
            Algorithm::BucketQueue => BucketQueueSearch::NAME,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BucketQueue => "bucket-queue",
        })
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bucket" | "bucket-queue" | "bucket_queue" | "delta" | "duan" => {
                Ok(Algorithm::BucketQueue)
            }
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("DIJKSTRA".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("Duan".parse::<Algorithm>().unwrap(), Algorithm::BucketQueue);
        assert_eq!(
            " bucket-queue ".parse::<Algorithm>().unwrap(),
            Algorithm::BucketQueue
        );
        assert_eq!(
            "astar".parse::<Algorithm>().unwrap_err(),
            Error::UnknownAlgorithm("astar".to_string())
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn default_is_dijkstra() {
        assert_eq!(Algorithm::default(), Algorithm::Dijkstra);
    }
}
