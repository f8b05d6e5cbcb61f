use serde::Serialize;

use crate::geo::{
    DistanceError, Graph, Node, NodeId, geodesic_distance, shortest_route, weighted_distance,
};
use crate::util::{format_coordinates, format_distance};

pub const UNREACHABLE: &str = "unreachable";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: NodeId,
    pub label: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            label: node.label.clone(),
            latitude: node.latitude,
            longitude: node.longitude,
        }
    }
}

impl NodeSummary {
    pub fn coordinates_text(&self) -> String {
        format_coordinates(self.latitude, self.longitude)
    }
}

/// Model (shortest path) and real (great-circle) distance between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceReport {
    pub first: NodeSummary,
    pub second: NodeSummary,
    /// `None` when the graph has no path between the nodes.
    pub model_distance: Option<f64>,
    pub real_distance_km: f64,
    /// Node ids along the shortest path, endpoints included; empty when unreachable.
    pub route: Vec<NodeId>,
}

impl DistanceReport {
    pub fn compute(graph: &Graph, first: NodeId, second: NodeId) -> Result<Self, DistanceError> {
        let first_node = graph
            .node_by_id(first)
            .map_err(|_| DistanceError::NotFound(first))?;
        let second_node = graph
            .node_by_id(second)
            .map_err(|_| DistanceError::NotFound(second))?;

        let model_distance = match weighted_distance(graph, first, second) {
            Ok(distance) => Some(distance),
            Err(DistanceError::NoPath { .. }) => None,
            Err(error) => return Err(error),
        };
        let route = match model_distance {
            Some(_) => shortest_route(graph, first, second)?.nodes,
            None => Vec::new(),
        };

        Ok(Self {
            first: NodeSummary::from(first_node),
            second: NodeSummary::from(second_node),
            model_distance,
            real_distance_km: geodesic_distance(first_node, second_node),
            route,
        })
    }

    pub fn model_distance_text(&self, unit: &str) -> String {
        self.model_distance
            .map(|distance| format_distance(distance, unit))
            .unwrap_or_else(|| UNREACHABLE.to_string())
    }

    pub fn real_distance_text(&self) -> String {
        format_distance(self.real_distance_km, "km")
    }
}
