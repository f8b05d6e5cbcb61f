use std::cmp::Ordering;
use std::collections::BinaryHeap;

use thiserror::Error;

use super::graph::{Graph, Node, NodeId};

/// Mean earth radius (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DistanceError {
    #[error("node {0} does not exist in the graph")]
    NotFound(NodeId),
    #[error("no path connects node {from} and node {to}")]
    NoPath { from: NodeId, to: NodeId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub distance: f64,
    pub nodes: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug)]
struct Frontier {
    cost: f64,
    index: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed so `BinaryHeap` pops the cheapest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

pub fn weighted_distance(graph: &Graph, from: NodeId, to: NodeId) -> Result<f64, DistanceError> {
    shortest_route(graph, from, to).map(|route| route.distance)
}

pub fn shortest_route(graph: &Graph, from: NodeId, to: NodeId) -> Result<Route, DistanceError> {
    let start = graph.index_of(from).ok_or(DistanceError::NotFound(from))?;
    let goal = graph.index_of(to).ok_or(DistanceError::NotFound(to))?;

    let mut best = vec![f64::INFINITY; graph.node_count()];
    let mut reached = vec![false; graph.node_count()];
    let mut parent = vec![usize::MAX; graph.node_count()];
    let mut frontier = BinaryHeap::new();

    best[start] = 0.0;
    reached[start] = true;
    frontier.push(Frontier {
        cost: 0.0,
        index: start,
    });

    while let Some(Frontier { cost, index }) = frontier.pop() {
        if index == goal {
            break;
        }
        if cost > best[index] {
            continue;
        }

        for &(next, weight) in graph.neighbors(index) {
            let candidate = cost + weight;
            if !reached[next] || candidate < best[next] {
                reached[next] = true;
                best[next] = candidate;
                parent[next] = index;
                frontier.push(Frontier {
                    cost: candidate,
                    index: next,
                });
            }
        }
    }

    if !reached[goal] {
        return Err(DistanceError::NoPath { from, to });
    }

    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        cursor = parent[cursor];
        path.push(cursor);
    }
    path.reverse();

    Ok(Route {
        distance: best[goal],
        nodes: path
            .into_iter()
            .filter_map(|index| graph.node_at(index).map(|node| node.id))
            .collect(),
    })
}

/// Haversine great-circle distance in kilometres. Ignores graph edges.
pub fn geodesic_distance(a: &Node, b: &Node) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let half_dlat = (lat_b - lat_a) / 2.0;
    let half_dlon = (b.longitude - a.longitude).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::default_graph::default_graph;
    use crate::geo::graph::Edge;

    #[test]
    fn new_york_to_san_francisco_goes_through_los_angeles() {
        let graph = default_graph();

        let route = shortest_route(&graph, NodeId(0), NodeId(4)).expect("reachable");
        assert_eq!(route.distance, 10.0);
        assert_eq!(route.nodes, vec![NodeId(0), NodeId(1), NodeId(4)]);
    }

    #[test]
    fn weighted_distance_is_symmetric_on_default_graph() {
        let graph = default_graph();
        for a in 0..5 {
            for b in 0..5 {
                let forward = weighted_distance(&graph, NodeId(a), NodeId(b));
                let backward = weighted_distance(&graph, NodeId(b), NodeId(a));
                assert_eq!(forward, backward, "pair {a}-{b}");
            }
        }
    }

    #[test]
    fn every_default_node_is_reachable_from_new_york() {
        let graph = default_graph();
        for target in 1..5 {
            assert!(weighted_distance(&graph, NodeId(0), NodeId(target)).is_ok());
        }
        assert_eq!(weighted_distance(&graph, NodeId(2), NodeId(2)), Ok(0.0));
    }

    #[test]
    fn picks_cheaper_multi_hop_route() {
        let graph = default_graph();
        // Chicago -> Houston direct costs 16, via New York and Los Angeles 7 + 4 + 8 = 19.
        assert_eq!(weighted_distance(&graph, NodeId(2), NodeId(3)), Ok(16.0));
        // Chicago -> Los Angeles direct costs 24, via New York 7 + 4 = 11.
        assert_eq!(weighted_distance(&graph, NodeId(2), NodeId(1)), Ok(11.0));
    }

    #[test]
    fn disconnected_nodes_report_no_path() {
        let graph = Graph::new(
            vec![Node::new(0, 0.0, 0.0), Node::new(1, 1.0, 1.0), Node::new(2, 2.0, 2.0)],
            vec![Edge::new(0, 0, 1, 1.0)],
        )
        .expect("graph is valid");

        assert_eq!(
            weighted_distance(&graph, NodeId(0), NodeId(2)),
            Err(DistanceError::NoPath {
                from: NodeId(0),
                to: NodeId(2),
            })
        );
        assert_eq!(
            weighted_distance(&graph, NodeId(0), NodeId(9)),
            Err(DistanceError::NotFound(NodeId(9)))
        );
    }

    #[test]
    fn huge_weights_stay_reachable() {
        let graph = Graph::new(
            vec![Node::new(0, 0.0, 0.0), Node::new(1, 1.0, 1.0), Node::new(2, 2.0, 2.0)],
            vec![Edge::new(0, 0, 1, 8e307), Edge::new(1, 1, 2, 8e307)],
        )
        .expect("total weight is finite");

        let route = shortest_route(&graph, NodeId(0), NodeId(2)).expect("reachable");
        assert_eq!(route.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(route.distance, 8e307 + 8e307);
        assert!(route.distance.is_finite());
    }

    #[test]
    fn geodesic_distance_matches_known_city_pair() {
        let graph = default_graph();
        let new_york = graph.node_by_id(NodeId(0)).expect("exists");
        let los_angeles = graph.node_by_id(NodeId(1)).expect("exists");

        let distance = geodesic_distance(new_york, los_angeles);
        assert!((3930.0..3950.0).contains(&distance), "got {distance}");
        assert_eq!(distance, geodesic_distance(los_angeles, new_york));
    }

    #[test]
    fn geodesic_distance_is_zero_only_for_identical_points() {
        let a = Node::new(0, 12.5, -45.0);
        let same = Node::new(1, 12.5, -45.0);
        let nearby = Node::new(2, 12.5, -45.0001);

        assert_eq!(geodesic_distance(&a, &same), 0.0);
        assert!(geodesic_distance(&a, &nearby) > 0.0);
    }
}
