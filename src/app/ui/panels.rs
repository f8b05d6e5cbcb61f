use eframe::egui::{self, Align, Context, Layout};

use crate::geo::{GraphOrigin, LoadedGraph, NodeId};
use crate::report::DistanceReport;

use super::super::{
    AppConfig, ReportState, SelectionController, SelectionError, ViewModel, ZoomController,
};

impl ViewModel {
    pub(in crate::app) fn new(loaded: LoadedGraph, config: &AppConfig) -> Self {
        Self {
            loaded,
            fit_policy: config.fit_policy,
            margin: config.margin,
            preserve_aspect: true,
            weight_unit: config.weight_unit.clone(),
            search: String::new(),
            search_cache: None,
            selection: SelectionController::default(),
            zoom: ZoomController::default(),
            report: None,
            scene_dirty: true,
            scene: None,
            visible_node_count: 0,
            visible_edge_count: 0,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, reload_requested: &mut bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Map Distance Model");
                    ui.separator();
                    ui.label(format!("source: {}", self.loaded.origin.describe()));
                    if let GraphOrigin::Default {
                        reason: Some(reason),
                    } = &self.loaded.origin
                    {
                        ui.colored_label(ui.visuals().warn_fg_color, "load failed")
                            .on_hover_text(reason.as_str());
                    }
                    ui.label(format!("nodes: {}", self.loaded.graph.node_count()));
                    ui.label(format!("edges: {}", self.loaded.graph.edge_count()));
                    if ui.button("Reload graph").clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.zoom.reset();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(visible_graph_text) = self.visible_graph_text() {
                            ui.label(visible_graph_text);
                        }
                        ui.label(format!("zoom {:.2}x", self.zoom.cumulative_scale()));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    pub(in crate::app) fn pick_node(&mut self, node: NodeId) {
        if self.selection.pick(node) {
            self.report = None;
        }
    }

    /// Only reachable once both slots are filled; the button is disabled otherwise.
    pub(in crate::app) fn calculate_distance(&mut self) {
        let (first, second) = match self.selection.current_pair(&self.loaded.graph) {
            Ok((first, second)) => (first.id, second.id),
            Err(SelectionError::Incomplete) => return,
            Err(error) => {
                self.report = Some(ReportState::Failed(error.to_string()));
                return;
            }
        };

        self.report = Some(match DistanceReport::compute(&self.loaded.graph, first, second) {
            Ok(report) => ReportState::Ready(report),
            Err(error) => ReportState::Failed(error.to_string()),
        });
    }

    pub(in crate::app) fn route(&self) -> &[NodeId] {
        match &self.report {
            Some(ReportState::Ready(report)) => report.route.as_slice(),
            _ => &[],
        }
    }

    pub(in crate::app) fn visible_graph_text(&self) -> Option<String> {
        self.scene.as_ref().map(|scene| {
            let mut text = format!(
                "visible: {} nodes / {} edges",
                self.visible_node_count.min(scene.nodes.len()),
                self.visible_edge_count.min(scene.edges.len())
            );
            if scene.skipped_edges > 0 {
                text.push_str(&format!(" ({} unresolved skipped)", scene.skipped_edges));
            }
            text
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{DEFAULT_MARGIN, FitPolicy};

    fn model() -> ViewModel {
        let config = AppConfig {
            source: None,
            fit_policy: FitPolicy::Margin,
            margin: DEFAULT_MARGIN,
            weight_unit: "km".to_string(),
        };
        ViewModel::new(LoadedGraph::builtin(None), &config)
    }

    #[test]
    fn calculate_requires_complete_selection() {
        let mut model = model();
        model.pick_node(NodeId(0));
        model.calculate_distance();
        assert!(model.report.is_none());
        assert!(model.route().is_empty());
    }

    #[test]
    fn calculate_fills_report_and_route() {
        let mut model = model();
        model.pick_node(NodeId(0));
        model.pick_node(NodeId(4));
        model.calculate_distance();

        match &model.report {
            Some(ReportState::Ready(report)) => {
                assert_eq!(report.model_distance, Some(10.0));
                assert_eq!(model.route(), &[NodeId(0), NodeId(1), NodeId(4)]);
            }
            _ => panic!("expected a ready report"),
        }
    }

    #[test]
    fn new_pick_discards_previous_report() {
        let mut model = model();
        model.pick_node(NodeId(0));
        model.pick_node(NodeId(4));
        model.calculate_distance();

        model.pick_node(NodeId(2));
        assert!(model.report.is_none());
        assert_eq!(model.selection.first(), Some(NodeId(2)));
    }
}
