use std::collections::HashMap;

use eframe::egui::{Context, Pos2, Rect, Vec2};

use crate::geo::{GraphSource, LoadedGraph, NodeId, load_or_default};
use crate::projection::FitPolicy;
use crate::report::DistanceReport;

mod graph;
mod render_utils;
mod selection;
mod ui;
mod zoom;

pub use selection::{SelectionController, SelectionError, SelectionState};
pub use zoom::ZoomController;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub source: Option<GraphSource>,
    pub fit_policy: FitPolicy,
    pub margin: f64,
    pub weight_unit: String,
}

pub struct MapDistanceApp {
    config: AppConfig,
    model: ViewModel,
}

struct ViewModel {
    loaded: LoadedGraph,
    fit_policy: FitPolicy,
    margin: f64,
    preserve_aspect: bool,
    weight_unit: String,
    search: String,
    search_cache: Option<SearchCache>,
    selection: SelectionController,
    zoom: ZoomController,
    report: Option<ReportState>,
    scene_dirty: bool,
    scene: Option<RenderScene>,
    visible_node_count: usize,
    visible_edge_count: usize,
}

struct SearchCache {
    query: String,
    matches: Vec<NodeId>,
}

enum ReportState {
    Ready(DistanceReport),
    Failed(String),
}

/// Projected copy of the graph for one viewport size and fit policy.
struct RenderScene {
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
    index_by_id: HashMap<NodeId, usize>,
    skipped_edges: usize,
    viewport: Vec2,
    drawn_bounds: Option<Rect>,
    extent: Option<Rect>,
}

struct RenderNode {
    id: NodeId,
    scene_pos: Pos2,
}

impl MapDistanceApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let loaded = load_or_default(config.source.as_ref());
        let model = ViewModel::new(loaded, &config);
        Self { config, model }
    }

    fn reload(&mut self) {
        let loaded = load_or_default(self.config.source.as_ref());
        let mut next = ViewModel::new(loaded, &self.config);
        next.fit_policy = self.model.fit_policy;
        next.margin = self.model.margin;
        next.preserve_aspect = self.model.preserve_aspect;
        self.model = next;
    }
}

impl eframe::App for MapDistanceApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut reload_requested = false;
        self.model.show(ctx, &mut reload_requested);

        if reload_requested {
            self.reload();
            ctx.request_repaint();
        }
    }
}
