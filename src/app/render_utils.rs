use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const EXTENT_FILL: Color32 = Color32::from_rgb(26, 32, 40);
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(100, 100, 255);
pub(super) const ROUTE_COLOR: Color32 = Color32::from_rgb(246, 206, 104);
pub(super) const NODE_COLOR: Color32 = Color32::from_rgb(220, 64, 64);
pub(super) const HOVER_COLOR: Color32 = Color32::from_rgb(255, 164, 101);
pub(super) const SELECTED_COLOR: Color32 = Color32::from_rgb(72, 199, 116);

/// Paints the viewport and, when known, the logical scene extent on screen.
pub(super) fn draw_background(painter: &Painter, rect: Rect, extent: Option<Rect>) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    if let Some(extent) = extent
        && extent.is_finite()
        && extent.intersects(rect)
    {
        painter.rect_filled(extent.intersect(rect), 0.0, EXTENT_FILL);
        let outline = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 140));
        painter.line_segment([extent.left_top(), extent.right_top()], outline);
        painter.line_segment([extent.right_top(), extent.right_bottom()], outline);
        painter.line_segment([extent.right_bottom(), extent.left_bottom()], outline);
        painter.line_segment([extent.left_bottom(), extent.left_top()], outline);
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0))
    }

    #[test]
    fn circles_touching_the_edge_are_visible() {
        assert!(circle_visible(viewport(), pos2(-3.0, 50.0), 4.0));
        assert!(!circle_visible(viewport(), pos2(-5.0, 50.0), 4.0));
    }

    #[test]
    fn edge_crossing_viewport_is_visible_without_visible_endpoints() {
        assert!(edge_visible(viewport(), pos2(-50.0, 50.0), pos2(150.0, 50.0), 0.0));
        assert!(!edge_visible(viewport(), pos2(-50.0, -10.0), pos2(-10.0, -50.0), 0.0));
    }
}
