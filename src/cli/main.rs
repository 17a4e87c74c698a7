#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use augflow::dot::{network_dot, parse_flow_network, residual_dot};
use augflow::{FlowEdge, FlowNetwork, FordFulkerson, NodeId, RawFlowEdge, Strategy};
use clap::{Parser, ValueEnum};
use csv::Writer;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

type Capacity = i64;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// Breadth-first search (Edmonds-Karp)
    Bfs,
    /// Depth-first search
    Dfs,
    /// Dijkstra on summed residual capacities
    Dijkstra,
    /// Dijkstra widest path
    Widest,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Dfs => Strategy::DepthFirst,
            StrategyArg::Dijkstra => Strategy::ShortestResidual,
            StrategyArg::Widest => Strategy::WidestPath,
        }
    }
}

/// Compute the maximum flow of a capacitated network with Ford-Fulkerson
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Network to read: DOT (`.gv`, `.dot`) or CSV with `from,to,capacity,flow` columns
    input: PathBuf,

    /// Augmenting path strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Bfs)]
    strategy: StrategyArg,

    /// Source node (defaults to the smallest node id)
    #[arg(long)]
    source: Option<NodeId>,

    /// Target node (defaults to the largest node id)
    #[arg(long)]
    target: Option<NodeId>,

    /// Write the final edge flows as CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the final flow network as DOT
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Write the residual graph of every iteration as DOT into this directory
    #[arg(long)]
    trace_dir: Option<PathBuf>,

    /// Log level written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

// Function to read a network from a DOT file
fn read_dot(path: &Path) -> Result<FlowNetwork<Capacity>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_flow_network(&text)?)
}

// Function to read a network from a CSV edge list
fn read_csv(path: &Path) -> Result<FlowNetwork<Capacity>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut network = FlowNetwork::new();
    for row in rdr.deserialize::<RawFlowEdge<Capacity>>() {
        network.insert(FlowEdge::try_from(row?)?)?;
    }
    Ok(network)
}

// Function to write the final flow of every edge
fn write_csv(network: &FlowNetwork<Capacity>, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;
    let mut edges = network.edges().collect::<Vec<_>>();
    edges.sort_by_key(|e| (e.from(), e.to()));
    for edge in edges {
        wtr.serialize(edge)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let is_dot = cli
        .input
        .extension()
        .map_or(false, |ext| ext == "gv" || ext == "dot");
    let mut network = if is_dot {
        read_dot(&cli.input)?
    } else {
        read_csv(&cli.input)?
    };

    let (smallest, largest) = network.terminals().ok_or(augflow::Error::EmptyNetwork)?;
    let source = cli.source.unwrap_or(smallest);
    let target = cli.target.unwrap_or(largest);
    let strategy = Strategy::from(cli.strategy);
    log::info!("running {strategy} from {source} to {target}");

    let mut frames = Vec::new();
    let summary = FordFulkerson::new(strategy).run_with(
        &mut network,
        source,
        target,
        |residual, augmentation| {
            if cli.trace_dir.is_some() {
                frames.push(residual_dot(residual, Some(augmentation)).to_string());
            }
        },
    )?;

    if let Some(dir) = &cli.trace_dir {
        fs::create_dir_all(dir)?;
        for (i, frame) in frames.iter().enumerate() {
            fs::write(dir.join(format!("residual_{:03}.gv", i + 1)), frame)?;
        }
    }
    if let Some(path) = &cli.dot {
        fs::write(path, network_dot(&network, source).to_string())?;
    }
    if let Some(path) = &cli.output {
        write_csv(&network, path)?;
    }

    println!("{}", summary.value);
    Ok(())
}
