mod bounds;
mod default_graph;
mod distance;
mod graph;
mod load;
mod parse;

pub use bounds::BoundingBox;
pub use distance::{DistanceError, geodesic_distance, shortest_route, weighted_distance};
#[cfg(test)]
pub use graph::Edge;
pub use graph::{Graph, Node, NodeId};
pub use load::{GraphOrigin, GraphSource, LoadedGraph, load_or_default};
pub use parse::ParseStop;
