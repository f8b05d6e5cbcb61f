use super::graph::Node;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Full scan over `nodes`; `None` when there is nothing to bound.
    pub fn of(nodes: &[Node]) -> Option<Self> {
        let first = nodes.first()?;
        let seed = Self {
            min_lon: first.longitude,
            max_lon: first.longitude,
            min_lat: first.latitude,
            max_lat: first.latitude,
        };

        Some(nodes.iter().skip(1).fold(seed, |bounds, node| Self {
            min_lon: bounds.min_lon.min(node.longitude),
            max_lon: bounds.max_lon.max(node.longitude),
            min_lat: bounds.min_lat.min(node.latitude),
            max_lat: bounds.max_lat.max(node.latitude),
        }))
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_every_node() {
        let nodes = vec![
            Node::new(0, 40.0, -74.0),
            Node::new(1, 34.0, -118.0),
            Node::new(2, 41.5, -87.5),
        ];

        let bounds = BoundingBox::of(&nodes).expect("non-empty");
        assert_eq!(bounds.min_lon, -118.0);
        assert_eq!(bounds.max_lon, -74.0);
        assert_eq!(bounds.min_lat, 34.0);
        assert_eq!(bounds.max_lat, 41.5);
        assert_eq!(bounds.lon_span(), 44.0);
    }

    #[test]
    fn single_node_has_zero_span() {
        let bounds = BoundingBox::of(&[Node::new(7, 10.0, 20.0)]).expect("non-empty");
        assert_eq!(bounds.lon_span(), 0.0);
        assert_eq!(bounds.lat_span(), 0.0);
    }
}
