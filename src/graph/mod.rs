pub mod node;
pub mod shared;
pub mod store;

pub use node::{Edge, Node, NodeId, NodeIndex};
pub use shared::SharedGraph;
pub use store::{ExportEdges, Graph};
