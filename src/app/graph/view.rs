use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2, vec2};

use crate::projection::FitTransform;
use crate::util::format_coordinates;

use super::super::ViewModel;
use super::super::render_utils::{
    EDGE_COLOR, HOVER_COLOR, NODE_COLOR, ROUTE_COLOR, SELECTED_COLOR, draw_background,
    edge_visible,
};

/// Marker radius in screen pixels at `cumulative_scale == 1`. Multiplied by the
/// user zoom only, never by the `FitTransform` scale, so markers keep their size
/// when the window is resized.
const MARKER_RADIUS: f32 = 5.0;
const HIT_SLOP: f32 = 3.0;
/// Pixels kept free around the fitted drawing.
const FIT_INSET: f32 = 24.0;
/// Above this many nodes only hovered and picked markers get labels.
const LABEL_NODE_LIMIT: usize = 64;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let viewport = (rect.size() - Vec2::splat(FIT_INSET * 2.0)).max(Vec2::splat(1.0));
        if self.scene_needs_rebuild(viewport) {
            self.rebuild_scene(viewport);
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.handle_reset_key(ui);

        let Some(scene) = self.scene.as_ref() else {
            draw_background(&painter, rect, None);
            return;
        };

        let drawn_bounds = scene.drawn_bounds.filter(|_| !self.loaded.graph.is_empty());
        let Some(drawn_bounds) = drawn_bounds else {
            draw_background(&painter, rect, None);
            self.visible_node_count = 0;
            self.visible_edge_count = 0;
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "The loaded graph has no nodes.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            return;
        };

        let fitted = scene
            .extent
            .map_or(drawn_bounds, |extent| drawn_bounds.union(extent));
        let fit = FitTransform::fit(fitted, viewport, self.preserve_aspect);
        let center = rect.center();
        let zoom = self.zoom;
        let to_screen = |scene_pos: Pos2| zoom.to_screen(center, fit.apply(scene_pos));

        let extent_on_screen = scene
            .extent
            .map(|extent| Rect::from_two_pos(to_screen(extent.min), to_screen(extent.max)));
        draw_background(&painter, rect, extent_on_screen);

        let screen_positions = scene
            .nodes
            .iter()
            .map(|node| to_screen(node.scene_pos))
            .collect::<Vec<_>>();
        let radius = MARKER_RADIUS * zoom.cumulative_scale();
        let visible_indices = Self::visible_indices(rect, &screen_positions, radius);

        let route_edges = self
            .route()
            .windows(2)
            .filter_map(|pair| {
                let source = scene.index_by_id.get(&pair[0])?;
                let target = scene.index_by_id.get(&pair[1])?;
                Some((*source.min(target), *source.max(target)))
            })
            .collect::<HashSet<_>>();

        let edge_width = (1.0 * zoom.cumulative_scale().sqrt()).clamp(0.6, 3.0);
        let mut visible_edge_count = 0usize;
        let mut route_segments = Vec::new();
        for &(source, target) in &scene.edges {
            let start = screen_positions[source];
            let end = screen_positions[target];
            if !edge_visible(rect, start, end, 2.0) {
                continue;
            }

            visible_edge_count += 1;
            if route_edges.contains(&(source.min(target), source.max(target))) {
                route_segments.push([start, end]);
            } else {
                painter.line_segment([start, end], Stroke::new(edge_width, EDGE_COLOR));
            }
        }
        for segment in route_segments {
            painter.line_segment(segment, Stroke::new(edge_width * 2.6, ROUTE_COLOR));
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = if response.hovered() {
            Self::hovered_index(
                pointer,
                &visible_indices,
                &screen_positions,
                radius + HIT_SLOP,
            )
        } else {
            None
        };
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        let hovered_index = hovered.map(|(index, _)| index);

        let graph = &self.loaded.graph;
        let label_all = graph.node_count() <= LABEL_NODE_LIMIT;
        for &index in &visible_indices {
            let render_node = &scene.nodes[index];
            let position = screen_positions[index];
            let is_selected = self.selection.contains(render_node.id);
            let is_hovered = hovered_index == Some(index);

            let color = if is_selected {
                SELECTED_COLOR
            } else if is_hovered {
                HOVER_COLOR
            } else {
                NODE_COLOR
            };
            painter.circle_filled(position, radius, color);
            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.5, Color32::from_rgba_unmultiplied(72, 199, 116, 150)),
                );
            }

            if (label_all || is_selected || is_hovered)
                && let Some(node) = graph.node_at(index)
            {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    node.display_name(),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(index) = hovered_index
            && let Some(node) = graph.node_at(index)
        {
            let panel_text = format!(
                "{}  |  {}  |  links {}",
                node.display_name(),
                format_coordinates(node.latitude, node.longitude),
                graph.neighbors(index).len()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        let picked = if response.clicked_by(egui::PointerButton::Primary) {
            hovered_index.map(|index| scene.nodes[index].id)
        } else {
            None
        };

        self.visible_node_count = visible_indices.len();
        self.visible_edge_count = visible_edge_count;

        if let Some(node) = picked {
            self.pick_node(node);
        }
    }
}
