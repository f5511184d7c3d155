use clap::{Parser, Subcommand, ValueEnum};
use podfit_core::{Node, Pod, ResourceVector};
use podfit_scheduler::types::pod_key;
use podfit_scheduler::{
    compute_pod_demand, AdmissionAdvisor, DimensionReport, NodeResourcesReport, NodeState,
    ResourceUnit,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "podfit", about = "Pod resource demand and node availability reports")]
struct Cli {
    /// Rendering of the results printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "PODFIT_OUTPUT", global = true)]
    output: OutputFormat,
    /// Format of log lines written to stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "PODFIT_LOG_FORMAT", global = true)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resources a pod needs at its peak
    Demand {
        /// Pod manifest (YAML or JSON)
        #[arg(long)]
        pod: PathBuf,
    },
    /// Compare a pod's demand with a node's remaining capacity
    Evaluate {
        /// Pod manifest (YAML or JSON)
        #[arg(long)]
        pod: PathBuf,
        /// Node manifest (YAML or JSON)
        #[arg(long)]
        node: PathBuf,
        /// Manifests of pods already assigned to the node
        #[arg(long)]
        assigned: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Evaluation {
    pod: String,
    node: String,
    demand: ResourceVector,
    reports: Vec<DimensionReport>,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    match cli.command {
        Commands::Demand { pod } => run_demand(&pod, cli.output),
        Commands::Evaluate {
            pod,
            node,
            assigned,
        } => run_evaluate(&pod, &node, &assigned, cli.output),
    }
}

/// Print a pod's demand vector
fn run_demand(pod_path: &Path, output: OutputFormat) -> miette::Result<()> {
    let pod: Pod = load_manifest(pod_path)?;
    let demand = compute_pod_demand(&pod);

    match output {
        OutputFormat::Text => print!("{}", render_demand(&pod_key(&pod), &demand)),
        OutputFormat::Json => println!("{}", podfit_core::to_json_pretty(&demand)?),
    }

    Ok(())
}

/// Evaluate a pod against a node and print the per-resource reports
fn run_evaluate(
    pod_path: &Path,
    node_path: &Path,
    assigned_paths: &[PathBuf],
    output: OutputFormat,
) -> miette::Result<()> {
    let pod: Pod = load_manifest(pod_path)?;
    let node: Node = load_manifest(node_path)?;
    let assigned = assigned_paths
        .iter()
        .map(|path| load_manifest::<Pod>(path))
        .collect::<miette::Result<Vec<_>>>()?;

    let node_state = NodeState::from_node(&node, &assigned);
    info!(
        "Evaluating pod {} against node {} ({} assigned pods)",
        pod_key(&pod),
        node_state.name,
        assigned.len()
    );

    let advisor = NodeResourcesReport::default();
    let reports = advisor.evaluate(&pod, Some(&node_state))?;

    let evaluation = Evaluation {
        pod: pod_key(&pod),
        node: node_state.name.clone(),
        demand: compute_pod_demand(&pod),
        reports,
    };

    match output {
        OutputFormat::Text => print!("{}", render_evaluation(&evaluation)),
        OutputFormat::Json => println!("{}", podfit_core::to_json_pretty(&evaluation)?),
    }

    Ok(())
}

/// Read and parse a YAML or JSON manifest
fn load_manifest<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> miette::Result<T> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read '{}': {}", path.display(), e))?;
    Ok(podfit_core::from_yaml(&data)?)
}

fn render_demand(pod: &str, demand: &ResourceVector) -> String {
    let mut out = format!("pod {}\n", pod);
    out.push_str(&format!("  cpu: {}\n", podfit_core::HumanCpu(demand.cpu_millis)));
    out.push_str(&format!("  memory: {}\n", podfit_core::HumanBytes(demand.memory_bytes)));
    out.push_str(&format!(
        "  ephemeral-storage: {}\n",
        podfit_core::HumanBytes(demand.ephemeral_storage_bytes)
    ));
    for (name, amount) in &demand.scalar_resources {
        let unit = ResourceUnit::for_resource(name);
        out.push_str(&format!("  {}: {}\n", name, unit.render(*amount)));
    }
    out
}

fn render_evaluation(evaluation: &Evaluation) -> String {
    let mut out = format!("pod {} on node {}\n", evaluation.pod, evaluation.node);

    if evaluation.reports.is_empty() {
        out.push_str("  no resources requested\n");
        return out;
    }

    for report in &evaluation.reports {
        let marker = if report.fits() { "" } else { " (exceeds available)" };
        out.push_str(&format!(
            "  {}: request {}, available {}{}\n",
            report.resource,
            report.requested_display(),
            report.available_display(),
            marker
        ));
    }
    out
}
