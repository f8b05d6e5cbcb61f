use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::geo::{BoundingBox, Node};

/// Added to degenerate spans so single-point or collinear graphs stay finite.
pub const SPAN_EPSILON: f64 = 1e-8;
/// Degrees added around the dataset extent by [`FitPolicy::Margin`].
pub const DEFAULT_MARGIN: f64 = 50.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FitPolicy {
    /// Scene in raw degree offsets padded by a margin; the view fit does the scaling.
    #[default]
    Margin,
    /// Scene stretched per axis to the viewport's pixel size.
    ViewportSize,
}

impl FitPolicy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Margin => "Margin",
            Self::ViewportSize => "Viewport size",
        }
    }
}

/// Affine map from `(lon, lat)` to scene coordinates. Latitude grows along
/// +y exactly like longitude grows along +x; there is no north-up flip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_lon: f64,
    pub offset_lat: f64,
}

impl ProjectionTransform {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        offset_lon: 0.0,
        offset_lat: 0.0,
    };

    pub fn compute(bounds: Option<BoundingBox>, policy: FitPolicy, viewport: Vec2) -> Self {
        let Some(bounds) = bounds else {
            return Self::IDENTITY;
        };

        let (scale_x, scale_y) = match policy {
            FitPolicy::Margin => (1.0, 1.0),
            FitPolicy::ViewportSize => {
                let width = f64::from(viewport.x.max(1.0));
                let height = f64::from(viewport.y.max(1.0));
                (
                    width / (bounds.lon_span() + SPAN_EPSILON),
                    height / (bounds.lat_span() + SPAN_EPSILON),
                )
            }
        };

        Self {
            scale_x,
            scale_y,
            offset_lon: bounds.min_lon,
            offset_lat: bounds.min_lat,
        }
    }

    pub fn project(&self, node: &Node) -> Pos2 {
        self.project_coordinates(node.longitude, node.latitude)
    }

    pub fn project_coordinates(&self, longitude: f64, latitude: f64) -> Pos2 {
        pos2(
            ((longitude - self.offset_lon) * self.scale_x) as f32,
            ((latitude - self.offset_lat) * self.scale_y) as f32,
        )
    }
}

/// Logical scene extent for a projected graph.
pub fn scene_extent(
    bounds: Option<BoundingBox>,
    policy: FitPolicy,
    margin: f64,
    viewport: Vec2,
) -> Option<Rect> {
    let bounds = bounds?;
    let extent = match policy {
        FitPolicy::Margin => {
            let half = margin.max(0.0) / 2.0;
            Rect::from_min_max(
                pos2(-half as f32, -half as f32),
                pos2(
                    (bounds.lon_span() + half) as f32,
                    (bounds.lat_span() + half) as f32,
                ),
            )
        }
        FitPolicy::ViewportSize => Rect::from_min_size(Pos2::ZERO, viewport.max(Vec2::splat(1.0))),
    };
    Some(extent)
}

/// Smallest rectangle containing every point, `None` for no points.
pub fn bounds_of(points: impl IntoIterator<Item = Pos2>) -> Option<Rect> {
    points.into_iter().fold(None, |bounds: Option<Rect>, point| {
        Some(match bounds {
            Some(rect) => rect.union(Rect::from_min_max(point, point)),
            None => Rect::from_min_max(point, point),
        })
    })
}

/// Fits a scene rectangle into a viewport, offsets are relative to the
/// viewport centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub scale: Vec2,
    pub scene_center: Pos2,
}

impl FitTransform {
    pub fn fit(scene: Rect, viewport: Vec2, preserve_aspect: bool) -> Self {
        let axis_scale = |target: f32, extent: f32| {
            if extent > f32::EPSILON && target > 0.0 {
                Some(target / extent)
            } else {
                None
            }
        };
        let scale_x = axis_scale(viewport.x, scene.width());
        let scale_y = axis_scale(viewport.y, scene.height());

        let scale = if preserve_aspect {
            let uniform = match (scale_x, scale_y) {
                (Some(x), Some(y)) => x.min(y),
                (Some(single), None) | (None, Some(single)) => single,
                (None, None) => 1.0,
            };
            Vec2::splat(uniform)
        } else {
            vec2(
                scale_x.or(scale_y).unwrap_or(1.0),
                scale_y.or(scale_x).unwrap_or(1.0),
            )
        };

        Self {
            scale,
            scene_center: scene.center(),
        }
    }

    pub fn apply(&self, scene: Pos2) -> Vec2 {
        (scene - self.scene_center) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Graph;

    fn single_node_graph() -> Graph {
        Graph::new(vec![Node::new(42, 37.7749, -122.4194)], Vec::new()).expect("valid")
    }

    #[test]
    fn single_node_projects_to_finite_point_under_both_policies() {
        let graph = single_node_graph();
        let node = &graph.nodes()[0];

        for policy in [FitPolicy::Margin, FitPolicy::ViewportSize] {
            let transform =
                ProjectionTransform::compute(graph.bounding_box(), policy, vec2(800.0, 600.0));
            let point = transform.project(node);
            assert!(point.x.is_finite() && point.y.is_finite(), "{policy:?}");
            assert!(!point.x.is_nan() && !point.y.is_nan(), "{policy:?}");
        }
    }

    #[test]
    fn empty_graph_uses_identity() {
        let transform =
            ProjectionTransform::compute(None, FitPolicy::ViewportSize, vec2(800.0, 600.0));
        assert_eq!(transform, ProjectionTransform::IDENTITY);
        assert!(scene_extent(None, FitPolicy::Margin, DEFAULT_MARGIN, Vec2::ZERO).is_none());
    }

    #[test]
    fn margin_policy_keeps_degree_offsets() {
        let bounds = BoundingBox {
            min_lon: -120.0,
            max_lon: -70.0,
            min_lat: 30.0,
            max_lat: 40.0,
        };
        let transform = ProjectionTransform::compute(Some(bounds), FitPolicy::Margin, Vec2::ZERO);

        assert_eq!(transform.project_coordinates(-70.0, 40.0), pos2(50.0, 10.0));
        assert_eq!(transform.project_coordinates(-120.0, 30.0), Pos2::ZERO);

        let extent = scene_extent(Some(bounds), FitPolicy::Margin, 10.0, Vec2::ZERO)
            .expect("extent");
        assert_eq!(extent.width(), 60.0);
        assert_eq!(extent.height(), 20.0);
    }

    #[test]
    fn viewport_policy_stretches_each_axis_and_grows_y_with_latitude() {
        let bounds = BoundingBox {
            min_lon: 0.0,
            max_lon: 10.0,
            min_lat: 0.0,
            max_lat: 5.0,
        };
        let transform = ProjectionTransform::compute(
            Some(bounds),
            FitPolicy::ViewportSize,
            vec2(1000.0, 500.0),
        );

        let corner = transform.project_coordinates(10.0, 5.0);
        assert!((corner.x - 1000.0).abs() < 1e-3);
        assert!((corner.y - 500.0).abs() < 1e-3);
        assert!(transform.project_coordinates(0.0, 4.0).y > transform.project_coordinates(0.0, 1.0).y);
    }

    #[test]
    fn fit_preserves_aspect_with_smaller_axis_ratio() {
        let scene = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 20.0));
        let fit = FitTransform::fit(scene, vec2(400.0, 400.0), true);

        assert_eq!(fit.scale, Vec2::splat(4.0));
        assert_eq!(fit.apply(pos2(100.0, 20.0)), vec2(200.0, 40.0));

        let stretched = FitTransform::fit(scene, vec2(400.0, 400.0), false);
        assert_eq!(stretched.scale, vec2(4.0, 20.0));
    }

    #[test]
    fn fit_of_degenerate_scene_is_finite() {
        let point = Rect::from_min_max(pos2(3.0, 3.0), pos2(3.0, 3.0));
        let fit = FitTransform::fit(point, vec2(640.0, 480.0), true);
        assert_eq!(fit.scale, Vec2::splat(1.0));
        assert_eq!(fit.apply(pos2(3.0, 3.0)), Vec2::ZERO);

        let vertical = Rect::from_min_max(pos2(0.0, 0.0), pos2(0.0, 10.0));
        let fit = FitTransform::fit(vertical, vec2(640.0, 480.0), false);
        assert_eq!(fit.scale, vec2(48.0, 48.0));
    }

    #[test]
    fn bounds_of_collects_all_points() {
        assert!(bounds_of(Vec::<Pos2>::new()).is_none());
        let rect = bounds_of([pos2(1.0, 5.0), pos2(-2.0, 3.0), pos2(4.0, -1.0)]).expect("bounds");
        assert_eq!(rect, Rect::from_min_max(pos2(-2.0, -1.0), pos2(4.0, 5.0)));
    }
}
