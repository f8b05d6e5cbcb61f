use std::collections::HashMap;

use eframe::egui::Vec2;
use log::{debug, warn};

use crate::projection::{ProjectionTransform, bounds_of, scene_extent};

use super::super::{RenderNode, RenderScene, ViewModel};

impl ViewModel {
    pub(in crate::app) fn scene_needs_rebuild(&self, viewport: Vec2) -> bool {
        self.scene_dirty
            || self
                .scene
                .as_ref()
                .is_none_or(|scene| scene.viewport != viewport)
    }

    /// Re-projects every node for `viewport`. Cheap enough to run on every
    /// resize, so nothing is patched in place.
    pub(in crate::app) fn rebuild_scene(&mut self, viewport: Vec2) {
        let graph = &self.loaded.graph;
        let bounds = graph.bounding_box();
        let transform = ProjectionTransform::compute(bounds, self.fit_policy, viewport);

        let nodes = graph
            .nodes()
            .iter()
            .map(|node| RenderNode {
                id: node.id,
                scene_pos: transform.project(node),
            })
            .collect::<Vec<_>>();

        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_by_id.insert(node.id, index);
        }

        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut skipped_edges = 0usize;
        for position in 0..graph.edge_count() {
            let Some(edge) = graph.edge_at(position) else {
                continue;
            };

            match (index_by_id.get(&edge.node1), index_by_id.get(&edge.node2)) {
                (Some(&source), Some(&target)) => edges.push((source, target)),
                _ => {
                    warn!(
                        "skipping edge {}: endpoint {} or {} is not in the scene",
                        edge.id, edge.node1, edge.node2
                    );
                    skipped_edges += 1;
                }
            }
        }

        let drawn_bounds = bounds_of(nodes.iter().map(|node| node.scene_pos));
        let extent = scene_extent(bounds, self.fit_policy, self.margin, viewport);
        debug!(
            "projected {} nodes with {:?} ({:?}) for viewport {:?}",
            nodes.len(),
            self.fit_policy,
            transform,
            viewport
        );

        self.scene = Some(RenderScene {
            nodes,
            edges,
            index_by_id,
            skipped_edges,
            viewport,
            drawn_bounds,
            extent,
        });
        self.scene_dirty = false;
    }
}
