use super::graph::{Edge, Graph, GraphError, Node};

/// Built-in five-city dataset shown when no graph files are supplied or they
/// cannot be read.
pub fn default_graph() -> Graph {
    build_default_graph().unwrap_or_default()
}

fn build_default_graph() -> Result<Graph, GraphError> {
    let nodes = vec![
        Node::new(0, 40.7128, -74.0060).with_label("New York"),
        Node::new(1, 34.0522, -118.2437).with_label("Los Angeles"),
        Node::new(2, 41.8781, -87.6298).with_label("Chicago"),
        Node::new(3, 29.7604, -95.3698).with_label("Houston"),
        Node::new(4, 37.7749, -122.4194).with_label("San Francisco"),
    ];

    let edges = vec![
        Edge::new(0, 0, 1, 4.0),
        Edge::new(1, 0, 2, 7.0),
        Edge::new(2, 1, 2, 24.0),
        Edge::new(3, 1, 3, 8.0),
        Edge::new(4, 2, 3, 16.0),
        Edge::new(5, 1, 4, 6.0),
        Edge::new(6, 3, 4, 21.0),
    ];

    Graph::new(nodes, edges)
}
