use anyhow::{Context, bail};
use clap::Parser;
use colored::Colorize;

use freight_flow::domain::network::edge::EdgeKey;
use freight_flow::domain::network::id::NodeId;
use freight_flow::domain::network::network_model::NetworkModel;
use freight_flow::domain::network::node::Node;
use freight_flow::domain::simulation::statistics::NetworkStatistics;
use freight_flow::generate_flow_simulation;
use freight_flow::logger;
use freight_flow::report::edge_report::write_edge_report_file;

/// Recomputes freight flow over a transport network after blocking edges.
#[derive(Debug, Parser)]
#[command(name = "freight_flow", version)]
struct Cli {
    /// Network definition (nodes + edges).
    #[arg(short, long, default_value = "data/network.json")]
    network: String,

    /// Optional simulation configuration overriding the defaults.
    #[arg(short, long)]
    config: Option<String>,

    /// Flow multiplier, clamped to the configured range.
    #[arg(short, long)]
    flow_scale: Option<f64>,

    /// Main edge to block, as `<a>-<b>`. May be repeated.
    #[arg(short, long = "block")]
    blocks: Vec<EdgeKey>,

    /// Write a CSV edge report to this path.
    #[arg(short, long)]
    report: Option<String>,

    /// Print the full snapshot as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    log::info!("Logger initialized. Loading network from '{}'.", cli.network);

    let mut engine =
        generate_flow_simulation(&cli.network, cli.config.as_deref()).with_context(|| format!("could not load network '{}'", cli.network))?;

    if let Some(scale) = cli.flow_scale {
        let applied = engine.set_flow_scale(scale);
        log::info!("Flow scale set to {:.2} (requested {:.2}).", applied, scale);
    }

    for key in cli.blocks.iter() {
        if !engine.toggle_block(*key) {
            bail!("edge {} is not an original main edge of this network", key);
        }
    }

    let snapshot = engine.snapshot();

    if let Some(path) = cli.report.as_deref() {
        write_edge_report_file(path, &snapshot).with_context(|| format!("could not write report '{}'", path))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let stats = NetworkStatistics::from(&snapshot);
    let mode = if snapshot.alternative_mode { "ALTERNATIVE ROUTING ACTIVE".yellow().bold() } else { "normal operation".green().bold() };

    println!("{} {}", "Freight flow:".bold(), mode);
    println!("{}", stats);

    for key in snapshot.overloaded_edges() {
        println!("  {} {} ({})", "overloaded".red(), key, edge_label(engine.model(), &key));
    }
    for key in snapshot.rerouted_edges.iter() {
        println!("  {} {} ({})", "reroute".yellow(), key, edge_label(engine.model(), key));
    }

    Ok(())
}

fn edge_label(model: &NetworkModel, key: &EdgeKey) -> String {
    let name = |id: NodeId| model.node(id).map_or_else(|| id.to_string(), Node::label);
    format!("{} - {}", name(key.low), name(key.high))
}
