use eframe::egui::{self, Key, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::circle_visible;

impl ViewModel {
    /// Ctrl/Cmd + wheel (or pinch) zooms one step around the pointer; a plain
    /// wheel scrolls the view.
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let (zoom_delta, scroll, pointer) = ui.input(|input| {
            (
                input.zoom_delta(),
                input.raw_scroll_delta,
                input.pointer.hover_pos(),
            )
        });
        let anchor = pointer.map(|pointer| pointer - rect.center());

        if zoom_delta > 1.0 + f32::EPSILON {
            self.zoom.zoom_in(anchor);
        } else if zoom_delta < 1.0 - f32::EPSILON {
            self.zoom.zoom_out(anchor);
        } else if scroll != Vec2::ZERO {
            self.zoom.pan_by(scroll);
        }
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.zoom.pan_by(response.drag_delta());
        }
    }

    pub(in crate::app) fn handle_reset_key(&mut self, ui: &Ui) {
        if ui.ctx().wants_keyboard_input() {
            return;
        }

        if ui.input(|input| input.key_pressed(Key::R)) {
            self.zoom.reset();
        }
    }

    pub(in crate::app) fn visible_indices(
        rect: Rect,
        screen_positions: &[Pos2],
        radius: f32,
    ) -> Vec<usize> {
        (0..screen_positions.len())
            .filter(|&index| circle_visible(rect, screen_positions[index], radius))
            .collect()
    }

    /// Marker under `pointer`; the closest centre wins when markers overlap.
    pub(in crate::app) fn hovered_index(
        pointer: Option<Pos2>,
        visible_indices: &[usize],
        screen_positions: &[Pos2],
        hit_radius: f32,
    ) -> Option<(usize, f32)> {
        pointer.and_then(|pointer| {
            visible_indices
                .iter()
                .filter_map(|index| {
                    let distance = screen_positions[*index].distance(pointer);
                    if distance <= hit_radius {
                        Some((*index, distance))
                    } else {
                        None
                    }
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
        })
    }
}
