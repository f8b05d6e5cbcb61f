use eframe::egui::{Button, RichText, Ui};

use crate::geo::{GraphOrigin, NodeId, ParseStop};
use crate::report::NodeSummary;

use super::super::{ReportState, SelectionState, ViewModel};

const NOT_SELECTED: &str = "Not selected";
const NOT_CALCULATED: &str = "Not calculated";

fn selection_hint(state: SelectionState) -> &'static str {
    match state {
        SelectionState::Empty => "Click a node to pick Point 1.",
        SelectionState::FirstPicked { .. } => "Click another node to pick Point 2.",
        SelectionState::BothPicked { .. } => "Both points picked.",
    }
}

fn stop_text(stop: &ParseStop) -> String {
    format!("stopped at line {}: {}", stop.line, stop.error)
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Distance Information");
        ui.add_space(6.0);

        let first_text = self.point_text(self.selection.first());
        let second_text = self.point_text(self.selection.second());
        ui.label(RichText::new("Point 1").strong());
        ui.label(first_text);
        ui.add_space(4.0);
        ui.label(RichText::new("Point 2").strong());
        ui.label(second_text);
        ui.weak(selection_hint(self.selection.state()));

        ui.separator();
        let (model_text, real_text) = match &self.report {
            Some(ReportState::Ready(report)) => (
                report.model_distance_text(&self.weight_unit),
                report.real_distance_text(),
            ),
            Some(ReportState::Failed(_)) | None => {
                (NOT_CALCULATED.to_string(), NOT_CALCULATED.to_string())
            }
        };
        ui.label(format!("Approx Distance (Model): {model_text}"));
        ui.label(format!("Real Distance: {real_text}"));
        if let Some(ReportState::Failed(message)) = &self.report {
            ui.colored_label(ui.visuals().error_fg_color, message.as_str());
        }

        ui.add_space(6.0);
        let mut calculate = false;
        let mut clear = false;
        ui.horizontal(|ui| {
            calculate = ui
                .add_enabled(
                    self.selection.pair().is_some(),
                    Button::new("Calculate Distance"),
                )
                .on_disabled_hover_text("Pick two nodes on the map first.")
                .clicked();
            clear = ui
                .add_enabled(
                    self.selection.first().is_some(),
                    Button::new("Clear selection"),
                )
                .clicked();
        });
        if calculate {
            self.calculate_distance();
        }
        if clear {
            self.selection.clear();
            self.report = None;
        }

        let route_text = self.route_text();
        if let Some(route_text) = route_text {
            ui.add_space(4.0);
            ui.label(RichText::new("Shortest route").strong());
            ui.label(route_text);
        }

        ui.separator();
        self.draw_load_diagnostics(ui);
    }

    fn point_text(&self, id: Option<NodeId>) -> String {
        let Some(id) = id else {
            return NOT_SELECTED.to_string();
        };

        match self.loaded.graph.node_by_id(id) {
            Ok(node) => {
                let summary = NodeSummary::from(node);
                format!("{}\n{}", node.display_name(), summary.coordinates_text())
            }
            Err(error) => error.to_string(),
        }
    }

    fn route_text(&self) -> Option<String> {
        let route = self.route();
        if route.is_empty() {
            return None;
        }

        let graph = &self.loaded.graph;
        let names = route
            .iter()
            .map(|id| {
                graph
                    .node_by_id(*id)
                    .map(|node| node.display_name())
                    .unwrap_or_else(|_| id.to_string())
            })
            .collect::<Vec<_>>();
        Some(names.join(" -> "))
    }

    fn draw_load_diagnostics(&self, ui: &mut Ui) {
        ui.collapsing("Load diagnostics", |ui| {
            ui.label(format!("Source: {}", self.loaded.origin.describe()));
            if let GraphOrigin::Default {
                reason: Some(reason),
            } = &self.loaded.origin
            {
                ui.colored_label(ui.visuals().warn_fg_color, reason.as_str());
            }

            let mut clean = true;
            if let Some(stop) = &self.loaded.node_stop {
                clean = false;
                ui.label(format!("Nodes file {}", stop_text(stop)));
            }
            if let Some(stop) = &self.loaded.edge_stop {
                clean = false;
                ui.label(format!("Edges file {}", stop_text(stop)));
            }
            if !self.loaded.dropped_edges.is_empty() {
                clean = false;
                let ids = self
                    .loaded
                    .dropped_edges
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                ui.label(format!(
                    "Dropped {} edge(s) with unknown endpoints: {}",
                    ids.len(),
                    ids.join(", ")
                ));
            }
            if clean {
                ui.weak("Both files were read without problems.");
            }
        });
    }
}
