use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::bounds::BoundingBox;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub i64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
}

impl Node {
    pub fn new(id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            id: NodeId(id),
            latitude,
            longitude,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{label} (#{})", self.id),
            None => format!("#{}", self.id),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub node1: NodeId,
    pub node2: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(id: i64, node1: i64, node2: i64, weight: f64) -> Self {
        Self {
            id: EdgeId(id),
            node1: NodeId(node1),
            node2: NodeId(node2),
            weight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist in the graph")]
    NotFound(NodeId),
    #[error("node id {0} appears more than once")]
    DuplicateNode(NodeId),
    #[error("edge {edge} references unknown node {node}")]
    UnknownEndpoint { edge: EdgeId, node: NodeId },
    #[error("edge {edge} has invalid weight {weight}")]
    InvalidWeight { edge: EdgeId, weight: f64 },
    #[error("total edge weight exceeds the representable range")]
    WeightOverflow,
}

/// Read-only geographic graph. Positions in `nodes`/`edges` are storage
/// order only; every cross reference goes through node ids.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id, index).is_some() {
                return Err(GraphError::DuplicateNode(node.id));
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        let mut total_weight = 0.0_f64;
        for edge in &edges {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    edge: edge.id,
                    weight: edge.weight,
                });
            }

            let resolve = |node: NodeId| {
                index_by_id
                    .get(&node)
                    .copied()
                    .ok_or(GraphError::UnknownEndpoint {
                        edge: edge.id,
                        node,
                    })
            };
            // Any shortest path is bounded by the total, so distances stay finite.
            total_weight += edge.weight;
            if !total_weight.is_finite() {
                return Err(GraphError::WeightOverflow);
            }

            let from = resolve(edge.node1)?;
            let to = resolve(edge.node2)?;

            adjacency[from].push((to, edge.weight));
            if from != to {
                adjacency[to].push((from, edge.weight));
            }
        }

        Ok(Self {
            nodes,
            edges,
            index_by_id,
            adjacency,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_at(&self, position: usize) -> Option<&Node> {
        self.nodes.get(position)
    }

    pub fn edge_at(&self, position: usize) -> Option<&Edge> {
        self.edges.get(position)
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    pub fn node_by_id(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.index_of(id)
            .map(|index| &self.nodes[index])
            .ok_or(GraphError::NotFound(id))
    }

    /// Undirected neighbours of the node stored at `position`, with edge weights.
    pub fn neighbors(&self, position: usize) -> &[(usize, f64)] {
        self.adjacency
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_ids_not_positions() {
        let graph = Graph::new(
            vec![Node::new(10, 1.0, 2.0), Node::new(3, 4.0, 5.0)],
            vec![Edge::new(0, 3, 10, 2.5)],
        )
        .expect("graph is valid");

        assert_eq!(graph.node_by_id(NodeId(3)).map(|node| node.latitude), Ok(4.0));
        assert_eq!(graph.index_of(NodeId(10)), Some(0));
        assert_eq!(graph.node_at(1).map(|node| node.id), Some(NodeId(3)));
        assert_eq!(
            graph.node_by_id(NodeId(1)),
            Err(GraphError::NotFound(NodeId(1)))
        );
    }

    #[test]
    fn edges_are_undirected_in_adjacency() {
        let graph = Graph::new(
            vec![Node::new(0, 0.0, 0.0), Node::new(1, 1.0, 1.0)],
            vec![Edge::new(0, 0, 1, 7.0)],
        )
        .expect("graph is valid");

        assert_eq!(graph.neighbors(0), &[(1, 7.0)]);
        assert_eq!(graph.neighbors(1), &[(0, 7.0)]);
        assert!(graph.neighbors(5).is_empty());
    }

    #[test]
    fn rejects_edges_with_unknown_endpoints() {
        let result = Graph::new(vec![Node::new(0, 0.0, 0.0)], vec![Edge::new(4, 0, 9, 1.0)]);

        assert_eq!(
            result.err(),
            Some(GraphError::UnknownEndpoint {
                edge: EdgeId(4),
                node: NodeId(9),
            })
        );
    }

    #[test]
    fn rejects_duplicate_ids_and_negative_weights() {
        let duplicate = Graph::new(vec![Node::new(1, 0.0, 0.0), Node::new(1, 2.0, 2.0)], vec![]);
        assert_eq!(duplicate.err(), Some(GraphError::DuplicateNode(NodeId(1))));

        let negative = Graph::new(
            vec![Node::new(0, 0.0, 0.0), Node::new(1, 1.0, 1.0)],
            vec![Edge::new(2, 0, 1, -3.0)],
        );
        assert!(matches!(
            negative.err(),
            Some(GraphError::InvalidWeight { edge: EdgeId(2), .. })
        ));
    }

    #[test]
    fn rejects_weights_whose_sum_overflows() {
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 1.0, 1.0),
            Node::new(2, 2.0, 2.0),
        ];

        let overflowing = Graph::new(
            nodes.clone(),
            vec![Edge::new(0, 0, 1, 1e308), Edge::new(1, 1, 2, 1e308)],
        );
        assert_eq!(overflowing.err(), Some(GraphError::WeightOverflow));

        let large = Graph::new(
            nodes,
            vec![Edge::new(0, 0, 1, 1e307), Edge::new(1, 1, 2, 1e307)],
        );
        assert!(large.is_ok());
    }

    #[test]
    fn empty_graph_has_no_bounding_box() {
        let graph = Graph::default();
        assert!(graph.is_empty());
        assert!(graph.bounding_box().is_none());
    }
}
