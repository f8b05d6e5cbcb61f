use eframe::egui::{self, Align, Layout, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::geo::{Graph, NodeId};
use crate::projection::FitPolicy;

use super::super::{SearchCache, ViewModel};

const SEARCH_RESULT_LIMIT: usize = 12;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Best matches first; ties keep graph order.
fn search_nodes(graph: &Graph, query: &str) -> Vec<NodeId> {
    let matcher = SkimMatcherV2::default();
    let mut scored = graph
        .nodes()
        .iter()
        .filter_map(|node| {
            fuzzy_match_score(&matcher, &node.display_name(), query).map(|score| (score, node.id))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .map(|(_, id)| id)
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Map Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Fit policy");
        let mut changed = false;
        ui.horizontal_wrapped(|ui| {
            changed |= ui
                .selectable_value(&mut self.fit_policy, FitPolicy::Margin, FitPolicy::Margin.label())
                .on_hover_text("Plot raw degrees and pad the scene with a fixed margin.")
                .changed();
            changed |= ui
                .selectable_value(
                    &mut self.fit_policy,
                    FitPolicy::ViewportSize,
                    FitPolicy::ViewportSize.label(),
                )
                .on_hover_text("Stretch the coordinate span to fill the viewport.")
                .changed();
        });

        ui.add_enabled_ui(self.fit_policy == FitPolicy::Margin, |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.margin, 0.0..=200.0).text("Scene margin"))
                .on_hover_text("Extra scene space around the nodes, split evenly per side.")
                .changed();
        });

        changed |= ui
            .checkbox(&mut self.preserve_aspect, "Preserve aspect ratio")
            .on_hover_text("Use one scale for both axes when fitting the drawing.")
            .changed();

        if changed {
            self.scene_dirty = true;
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Zoom in").clicked() {
                self.zoom.zoom_in(None);
            }
            if ui.button("Zoom out").clicked() {
                self.zoom.zoom_out(None);
            }
            if ui.button("Reset").on_hover_text("Shortcut: R").clicked() {
                self.zoom.reset();
            }
        });
        ui.small("Ctrl + wheel zooms around the pointer, drag pans.");

        ui.separator();
        ui.label("Find node")
            .on_hover_text("Fuzzy search over labels and ids; click a result to pick it.");
        ui.text_edit_singleline(&mut self.search);

        let matches = self.cached_search_matches().to_vec();
        let mut picked = None;
        if !matches.is_empty() {
            egui::ScrollArea::vertical()
                .id_salt("search_results_scroll")
                .max_height(220.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for id in &matches {
                        let Ok(node) = self.loaded.graph.node_by_id(*id) else {
                            continue;
                        };
                        let is_selected = self.selection.contains(*id);
                        let clicked = ui
                            .horizontal(|ui| {
                                let clicked =
                                    ui.selectable_label(is_selected, node.display_name()).clicked();
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    ui.weak(format!("{:.2}, {:.2}", node.latitude, node.longitude));
                                });
                                clicked
                            })
                            .inner;
                        if clicked {
                            picked = Some(*id);
                        }
                    }
                });
        } else if !self.search.trim().is_empty() {
            ui.weak("No matching nodes.");
        }

        if let Some(id) = picked {
            self.pick_node(id);
        }
    }

    fn cached_search_matches(&mut self) -> &[NodeId] {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_cache = None;
            return &[];
        }

        let stale = self
            .search_cache
            .as_ref()
            .is_none_or(|cached| cached.query != query);
        if stale {
            self.search_cache = Some(SearchCache {
                query: query.to_owned(),
                matches: search_nodes(&self.loaded.graph, query),
            });
        }

        self.search_cache
            .as_ref()
            .map(|cached| cached.matches.as_slice())
            .unwrap_or_default()
    }
}
