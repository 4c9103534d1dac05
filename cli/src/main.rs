//! Swing CLI: generate oscillator networks, solve them and time the solvers

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use num_traits::NumCast;
use rand::distributions::uniform::SampleUniform;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use swing::generator::GraphKind;
use swing::params::Parameters;
use swing::persistence::{
    read_arguments, trajectory_file_name, write_arguments, TrajectoryWriter,
};
use swing::{ForceKernel, Precision, Scalar, Scheme, SimulationConfig, SolverConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swing", version, about = "Swing-equation oscillator network solver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Rk1,
    Rk2,
    Rk4,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Rk1 => Scheme::Rk1,
            SchemeArg::Rk2 => Scheme::Rk2,
            SchemeArg::Rk4 => Scheme::Rk4,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphArg {
    /// Erdős–Rényi
    Er,
    /// Barabási–Albert
    Ba,
    /// Random regular
    Rr,
}

impl From<GraphArg> for GraphKind {
    fn from(arg: GraphArg) -> Self {
        match arg {
            GraphArg::Er => GraphKind::Er,
            GraphArg::Ba => GraphKind::Ba,
            GraphArg::Rr => GraphKind::Rr,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Network and integration options shared by `run` and `generate`
#[derive(clap::Args)]
struct NetworkArgs {
    /// JSON simulation config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random graph model
    #[arg(long, value_enum)]
    graph: Option<GraphArg>,

    /// Keep only the giant connected component
    #[arg(long)]
    gcc: bool,

    /// Number of oscillators
    #[arg(long)]
    nodes: Option<usize>,

    /// Mean degree of the random graph
    #[arg(long)]
    mean_degree: Option<f64>,

    /// Number of integration steps
    #[arg(long)]
    steps: Option<usize>,

    /// Step size
    #[arg(long)]
    dt: Option<f64>,

    /// Floating point width (32 or 64)
    #[arg(long, value_parser = parse_precision)]
    precision: Option<Precision>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random network, solve it and report solve times
    Run {
        #[command(flatten)]
        network: NetworkArgs,

        /// Integration scheme
        #[arg(long, value_enum)]
        scheme: Option<SchemeArg>,

        /// Use the dense pairwise force kernel
        #[arg(long)]
        reference: bool,

        /// Parallel force evaluation
        #[arg(long)]
        parallel: bool,

        /// Number of timed solves
        #[arg(long, default_value_t = 1)]
        repeat: usize,

        /// Directory for the trajectory of the last solve
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Solve the parameters stored in an argument file
    Solve {
        /// Argument file
        args: PathBuf,

        /// Number of oscillators
        #[arg(long)]
        nodes: usize,

        /// Number of edges
        #[arg(long)]
        edges: usize,

        /// Number of steps
        #[arg(long)]
        steps: usize,

        /// Integration scheme
        #[arg(long, value_enum, default_value = "rk4")]
        scheme: SchemeArg,

        /// Floating point width (32 or 64)
        #[arg(long, value_parser = parse_precision, default_value = "64")]
        precision: Precision,

        /// Use the dense pairwise force kernel
        #[arg(long)]
        reference: bool,

        /// Parallel force evaluation
        #[arg(long)]
        parallel: bool,

        /// Trajectory file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate a random network and write it as an argument file
    Generate {
        /// Argument file to write
        output: PathBuf,

        #[command(flatten)]
        network: NetworkArgs,

        /// Multiply every coupling weight
        #[arg(long)]
        coupling: Option<f64>,
    },
    /// Degree statistics of a random network
    Stats {
        #[command(flatten)]
        network: NetworkArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

fn parse_precision(value: &str) -> Result<Precision, String> {
    value
        .parse::<u32>()
        .ok()
        .and_then(Precision::from_bits)
        .ok_or_else(|| format!("precision must be 32 or 64, got '{}'", value))
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            network,
            scheme,
            reference,
            parallel,
            repeat,
            output,
        } => {
            simulation_config(&network).and_then(|mut config| {
                if let Some(scheme) = scheme {
                    config.scheme = scheme.into();
                }
                config.reference |= reference;
                config.parallel |= parallel;
                match config.precision {
                    Precision::Single => run::<f32>(&config, repeat, output.as_deref()),
                    Precision::Double => run::<f64>(&config, repeat, output.as_deref()),
                }
            })
        }
        Commands::Solve {
            args,
            nodes,
            edges,
            steps,
            scheme,
            precision,
            reference,
            parallel,
            output,
        } => {
            let kernel = if reference {
                ForceKernel::Pairwise
            } else {
                ForceKernel::EdgeList
            };
            let job = SolveJob {
                nodes,
                edges,
                steps,
                scheme: scheme.into(),
                kernel,
                config: SolverConfig { parallel },
            };
            match precision {
                Precision::Single => solve::<f32>(&args, &job, output.as_deref()),
                Precision::Double => solve::<f64>(&args, &job, output.as_deref()),
            }
        }
        Commands::Generate { output, network, coupling } => {
            simulation_config(&network).and_then(|config| match config.precision {
                Precision::Single => generate::<f32>(&config, coupling, &output),
                Precision::Double => generate::<f64>(&config, coupling, &output),
            })
        }
        Commands::Stats { network, format } => {
            simulation_config(&network).and_then(|config| stats(&config, &format))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Config file (or defaults) with command-line overrides applied
fn simulation_config(network: &NetworkArgs) -> anyhow::Result<SimulationConfig> {
    let mut config = match &network.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(graph) = network.graph {
        config.graph = graph.into();
    }
    config.giant_component |= network.gcc;
    if let Some(nodes) = network.nodes {
        config.num_nodes = nodes;
    }
    if let Some(mean_degree) = network.mean_degree {
        config.mean_degree = mean_degree;
    }
    if let Some(steps) = network.steps {
        config.num_steps = steps;
    }
    if let Some(dt) = network.dt {
        config.dt = dt;
    }
    if let Some(precision) = network.precision {
        config.precision = precision;
    }
    if network.seed.is_some() {
        config.seed = network.seed;
    }

    config.validate()?;
    Ok(config)
}

fn cast<T: Scalar>(value: f64, name: &str) -> anyhow::Result<T> {
    match <T as NumCast>::from(value) {
        Some(value) => Ok(value),
        None => bail!("{} = {} is not representable in f{}", name, value, T::BITS),
    }
}

/// Generate parameters from a config, drawing the graph and the initial
/// conditions from one seeded stream
fn generated_parameters<T: Scalar + SampleUniform>(
    config: &SimulationConfig,
) -> anyhow::Result<Parameters<T>> {
    let (graph, mut generator) = config.generate_graph()?;
    let dt = cast::<T>(config.dt, "dt")?;
    Ok(Parameters::from_graph(&graph, config.num_steps, dt, generator.rng_mut())?)
}

fn run<T: Scalar + SampleUniform>(
    config: &SimulationConfig,
    repeat: usize,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let params = generated_parameters::<T>(config)?;
    info!(
        nodes = params.num_nodes(),
        edges = params.num_edges(),
        graph = %config.graph,
        scheme = %config.scheme,
        precision = %config.precision,
        kernel = ?config.kernel(),
        "Generated network"
    );

    let mut last = None;
    for _ in 0..repeat.max(1) {
        let start = Instant::now();
        let trajectory = params.solve(config.scheme, config.solver_config(), config.kernel())?;
        println!("{}", start.elapsed().as_secs_f64());
        last = Some(trajectory);
    }

    if let (Some(dir), Some(trajectory)) = (output, last) {
        let file = trajectory_file_name(
            config.scheme,
            params.num_nodes(),
            params.num_edges(),
            params.num_steps(),
            T::BITS,
        );
        let path = dir.join(file);
        TrajectoryWriter::for_path(&path).write_to_path(&trajectory, &path)?;
    }
    Ok(())
}

struct SolveJob {
    nodes: usize,
    edges: usize,
    steps: usize,
    scheme: Scheme,
    kernel: ForceKernel,
    config: SolverConfig,
}

fn solve<T: Scalar>(args: &Path, job: &SolveJob, output: Option<&Path>) -> anyhow::Result<()> {
    let values: Vec<T> = read_arguments(args)
        .with_context(|| format!("reading argument file {}", args.display()))?;
    let params = Parameters::from_buffer(&values, job.nodes, job.edges, job.steps)?;
    let trajectory = params.solve(job.scheme, job.config, job.kernel)?;

    match output {
        Some(path) => TrajectoryWriter::for_path(path).write_to_path(&trajectory, path)?,
        None => TrajectoryWriter::default().write(&trajectory, io::stdout().lock())?,
    }
    Ok(())
}

fn generate<T: Scalar + SampleUniform>(
    config: &SimulationConfig,
    coupling: Option<f64>,
    output: &Path,
) -> anyhow::Result<()> {
    let mut params = generated_parameters::<T>(config)?;
    if let Some(coupling) = coupling {
        params = params.with_coupling(cast::<T>(coupling, "coupling")?);
    }
    write_arguments(output, &params)?;

    println!(
        "--nodes {} --edges {} --steps {} --precision {}",
        params.num_nodes(),
        params.num_edges(),
        params.num_steps(),
        T::BITS
    );
    Ok(())
}

fn stats(config: &SimulationConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let (graph, _) = config.generate_graph()?;
    let distribution = graph.get_degree_distribution();

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "graph": config.graph,
                "nodes": graph.node_count(),
                "edges": graph.edge_count(),
                "mean_degree": graph.get_mean_degree(),
                "distribution": distribution,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Csv => {
            println!("degree,count");
            for (degree, count) in &distribution {
                println!("{},{}", degree, count);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Degree", "Count"]);
            for (degree, count) in &distribution {
                table.add_row(vec![degree.to_string(), count.to_string()]);
            }

            println!("Graph:       {}", config.graph);
            println!("Nodes:       {}", graph.node_count());
            println!("Edges:       {}", graph.edge_count());
            println!("Mean degree: {:.4}", graph.get_mean_degree());
            println!("{}", table);
        }
    }
    Ok(())
}
