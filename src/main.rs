mod app;
mod geo;
mod projection;
mod report;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::app::{AppConfig, MapDistanceApp};
use crate::geo::{GraphSource, NodeId, load_or_default};
use crate::projection::{DEFAULT_MARGIN, FitPolicy};
use crate::report::DistanceReport;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Node file: `<id> <latitude> <longitude>` per line.
    #[arg(long, requires = "edges")]
    nodes: Option<PathBuf>,
    /// Edge file: `<id> <node1> <node2> <weight>` per line.
    #[arg(long, requires = "nodes")]
    edges: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = FitPolicy::Margin)]
    fit_policy: FitPolicy,
    /// Scene padding in degrees for the margin policy, split evenly per side.
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    margin: f64,
    /// Unit label printed after model distances.
    #[arg(long, default_value = "km")]
    weight_unit: String,
    /// Print the distance report from this node and exit.
    #[arg(long, requires = "to")]
    from: Option<i64>,
    #[arg(long, requires = "from")]
    to: Option<i64>,
    /// Print the report as JSON.
    #[arg(long, requires = "from")]
    json: bool,
}

impl Args {
    fn config(&self) -> AppConfig {
        let source = match (&self.nodes, &self.edges) {
            (Some(nodes), Some(edges)) => Some(GraphSource {
                nodes: nodes.clone(),
                edges: edges.clone(),
            }),
            _ => None,
        };

        AppConfig {
            source,
            fit_policy: self.fit_policy,
            margin: self.margin.max(0.0),
            weight_unit: self.weight_unit.clone(),
        }
    }
}

fn print_report(config: &AppConfig, from: i64, to: i64, json: bool) -> Result<()> {
    let loaded = load_or_default(config.source.as_ref());
    let report = DistanceReport::compute(&loaded.graph, NodeId(from), NodeId(to))
        .with_context(|| format!("cannot compute distance from {from} to {to}"))?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize distance report")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Point 1: {}", report.first.coordinates_text());
    println!("Point 2: {}", report.second.coordinates_text());
    println!(
        "Approx Distance (Model): {}",
        report.model_distance_text(&config.weight_unit)
    );
    println!("Real Distance: {}", report.real_distance_text());
    if !report.route.is_empty() {
        let route = report
            .route
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        println!("Route: {}", route.join(" -> "));
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config();

    if let (Some(from), Some(to)) = (args.from, args.to) {
        return print_report(&config, from, to, args.json);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Map Distance Model",
        options,
        Box::new(move |cc| Ok(Box::new(MapDistanceApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to start the viewer: {error}"))
}
