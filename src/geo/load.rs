use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use super::default_graph::default_graph;
use super::graph::{EdgeId, Graph};
use super::parse::{ParseStop, parse_edge_records, parse_node_records};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSource {
    pub nodes: PathBuf,
    pub edges: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphOrigin {
    Files(GraphSource),
    /// Built-in dataset; `reason` is set when files were given but failed.
    Default { reason: Option<String> },
}

impl GraphOrigin {
    pub fn describe(&self) -> String {
        match self {
            Self::Files(source) => format!(
                "{} + {}",
                source.nodes.display(),
                source.edges.display()
            ),
            Self::Default { reason: None } => "built-in dataset".to_string(),
            Self::Default { reason: Some(_) } => "built-in dataset (fallback)".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub origin: GraphOrigin,
    pub node_stop: Option<ParseStop>,
    pub edge_stop: Option<ParseStop>,
    pub dropped_edges: Vec<EdgeId>,
}

impl LoadedGraph {
    pub fn builtin(reason: Option<String>) -> Self {
        Self {
            graph: default_graph(),
            origin: GraphOrigin::Default { reason },
            node_stop: None,
            edge_stop: None,
            dropped_edges: Vec::new(),
        }
    }
}

pub fn load_graph(source: &GraphSource) -> Result<LoadedGraph> {
    let raw_nodes = read_source(&source.nodes, "node")?;
    let raw_edges = read_source(&source.edges, "edge")?;

    let nodes = parse_node_records(&raw_nodes);
    if let Some(stop) = &nodes.stopped_at {
        warn!(
            "node file {} stopped at line {}: {}",
            source.nodes.display(),
            stop.line,
            stop.error
        );
    }

    let edges = parse_edge_records(&raw_edges);
    if let Some(stop) = &edges.stopped_at {
        warn!(
            "edge file {} stopped at line {}: {}",
            source.edges.display(),
            stop.line,
            stop.error
        );
    }

    let known_ids = nodes.records.iter().map(|node| node.id).collect::<HashSet<_>>();
    let mut dropped_edges = Vec::new();
    let mut kept_edges = Vec::with_capacity(edges.records.len());
    for edge in edges.records {
        if known_ids.contains(&edge.node1) && known_ids.contains(&edge.node2) {
            kept_edges.push(edge);
        } else {
            warn!(
                "dropping edge {} ({} - {}): endpoint not among loaded nodes",
                edge.id, edge.node1, edge.node2
            );
            dropped_edges.push(edge.id);
        }
    }

    let graph = Graph::new(nodes.records, kept_edges).with_context(|| {
        format!(
            "graph files {} and {} are inconsistent",
            source.nodes.display(),
            source.edges.display()
        )
    })?;

    info!(
        "loaded {} nodes and {} edges from {} and {}",
        graph.node_count(),
        graph.edge_count(),
        source.nodes.display(),
        source.edges.display()
    );

    Ok(LoadedGraph {
        graph,
        origin: GraphOrigin::Files(source.clone()),
        node_stop: nodes.stopped_at,
        edge_stop: edges.stopped_at,
        dropped_edges,
    })
}

/// Loads `source` when given, otherwise or on failure the built-in dataset.
pub fn load_or_default(source: Option<&GraphSource>) -> LoadedGraph {
    let Some(source) = source else {
        info!("no graph files supplied, using built-in dataset");
        return LoadedGraph::builtin(None);
    };

    match load_graph(source) {
        Ok(loaded) => loaded,
        Err(error) => {
            warn!("falling back to built-in dataset: {error:#}");
            LoadedGraph::builtin(Some(format!("{error:#}")))
        }
    }
}

/// Raw bytes; encoding problems are per line and handled by the parser.
fn read_source(path: &Path, kind: &str) -> Result<Vec<u8>> {
    fs::read(path)
        .with_context(|| format!("failed to read {kind} file {}", path.display()))
}
