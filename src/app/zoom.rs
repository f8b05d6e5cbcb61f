use eframe::egui::{Pos2, Vec2};
use log::debug;

pub const ZOOM_STEP: f32 = 1.15;

/// Cumulative zoom and pan layered over the fitted base view. Offsets are
/// relative to the viewport centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomController {
    cumulative_scale: f32,
    pan: Vec2,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            cumulative_scale: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ZoomController {
    pub fn cumulative_scale(&self) -> f32 {
        self.cumulative_scale
    }

    pub fn zoom_in(&mut self, anchor: Option<Vec2>) {
        self.rescale(self.cumulative_scale * ZOOM_STEP, anchor);
    }

    pub fn zoom_out(&mut self, anchor: Option<Vec2>) {
        self.rescale(self.cumulative_scale / ZOOM_STEP, anchor);
    }

    fn rescale(&mut self, next_scale: f32, anchor: Option<Vec2>) {
        let anchor = anchor.unwrap_or(Vec2::ZERO);
        let base_under_anchor = (anchor - self.pan) / self.cumulative_scale;

        self.cumulative_scale = next_scale;
        self.pan = anchor - base_under_anchor * self.cumulative_scale;
        debug!("zoom {:.3} pan {:?}", self.cumulative_scale, self.pan);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_screen(&self, center: Pos2, base: Vec2) -> Pos2 {
        center + self.pan + base * self.cumulative_scale
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn to_base(zoom: &ZoomController, center: Pos2, screen: Pos2) -> Vec2 {
        (screen - center - zoom.pan) / zoom.cumulative_scale
    }

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut zoom = ZoomController::default();
        zoom.zoom_in(None);
        zoom.zoom_in(Some(vec2(40.0, -12.0)));
        let before = zoom.cumulative_scale();

        zoom.zoom_in(Some(vec2(-5.0, 8.0)));
        zoom.zoom_out(Some(vec2(-5.0, 8.0)));

        assert!((zoom.cumulative_scale() - before).abs() < 1e-5);
    }

    #[test]
    fn reset_always_returns_identity() {
        let mut zoom = ZoomController::default();
        for _ in 0..25 {
            zoom.zoom_in(Some(vec2(100.0, 50.0)));
        }
        zoom.pan_by(vec2(30.0, 30.0));
        zoom.reset();

        assert_eq!(zoom.cumulative_scale(), 1.0);
        assert_eq!(zoom, ZoomController::default());
    }

    #[test]
    fn zoom_keeps_point_under_pointer_fixed() {
        let center = pos2(400.0, 300.0);
        let pointer = pos2(520.0, 210.0);
        let mut zoom = ZoomController::default();
        zoom.pan_by(vec2(15.0, -20.0));

        let base = to_base(&zoom, center, pointer);
        zoom.zoom_in(Some(pointer - center));
        let after = zoom.to_screen(center, base);

        assert!((after - pointer).length() < 1e-3);
        assert!((zoom.cumulative_scale() - ZOOM_STEP).abs() < 1e-6);
    }

    #[test]
    fn unanchored_zoom_scales_about_center() {
        let center = pos2(100.0, 100.0);
        let mut zoom = ZoomController::default();
        zoom.zoom_out(None);

        assert_eq!(zoom.to_screen(center, Vec2::ZERO), center);
        let edge = zoom.to_screen(center, vec2(115.0, 0.0));
        assert!((edge.x - 200.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_is_unbounded() {
        let mut zoom = ZoomController::default();
        for _ in 0..60 {
            zoom.zoom_out(None);
        }
        assert!(zoom.cumulative_scale() < 1e-3);
        assert!(zoom.cumulative_scale() > 0.0);
    }
}
