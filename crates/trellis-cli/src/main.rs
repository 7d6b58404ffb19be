use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use trellis_core::{
    AlgorithmKind, AlgorithmResult, Format, GeneratorKind, GeneratorOptions, Session,
    SessionConfig, Status,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Algorithm(String),
    Io(std::io::Error),
    Core(trellis_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Algorithm(msg) => write!(f, "Algorithm failed: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<trellis_core::Error> for CliError {
    fn from(value: trellis_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about = "Generate, convert, analyse and lay out graphs", long_about = None)]
struct Cli {
    /// Session config (JSON); missing keys take defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random graph
    Generate {
        #[arg(long, value_enum, default_value_t = GraphShape::Random)]
        kind: GraphShape,

        #[arg(short = 'n', long, default_value_t = 10)]
        vertices: usize,

        #[arg(short, long, default_value_t = 0.3)]
        probability: f64,

        #[arg(long, default_value_t = 1.0)]
        min_weight: f64,

        #[arg(long, default_value_t = 10.0)]
        max_weight: f64,

        /// Seed for reproducible output (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run an algorithm and print its result as JSON
    Run {
        #[arg(value_enum)]
        algorithm: AlgorithmArg,

        #[command(flatten)]
        input: InputArgs,

        /// Start vertex for shortest-path
        #[arg(long)]
        from: Option<String>,

        /// End vertex for shortest-path
        #[arg(long)]
        to: Option<String>,

        /// Layout iterations (overrides the config)
        #[arg(long)]
        iterations: Option<usize>,

        // Graph after the run, mostly useful with `layout`.
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert between JSON and CSV
    Convert {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print vertex/edge statistics as JSON
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input graph file, `-` for stdin
    #[arg(value_name = "INPUT")]
    path: PathBuf,

    /// Input format (defaults to the file extension)
    #[arg(long = "input-format", value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Output format (defaults to the output extension, then JSON)
    #[arg(long = "output-format", value_enum)]
    output_format: Option<FormatArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphShape {
    Random,
    Tree,
    Weighted,
}

impl From<GraphShape> for GeneratorKind {
    fn from(value: GraphShape) -> Self {
        match value {
            GraphShape::Random => GeneratorKind::Random,
            GraphShape::Tree => GeneratorKind::Tree,
            GraphShape::Weighted => GeneratorKind::Weighted,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    #[value(alias = "dijkstra")]
    ShortestPath,
    #[value(alias = "kosaraju", alias = "strongly-connected")]
    Scc,
    #[value(alias = "force-atlas2")]
    Layout,
}

impl From<AlgorithmArg> for AlgorithmKind {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::ShortestPath => AlgorithmKind::ShortestPath,
            AlgorithmArg::Scc => AlgorithmKind::StronglyConnected,
            AlgorithmArg::Layout => AlgorithmKind::Layout,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => Format::Json,
            FormatArg::Csv => Format::Csv,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOut {
    vertices: usize,
    edges: usize,
    weighted_edges: usize,
    directed_edges: usize,
    self_loops: usize,
    total_weight: f64,
    has_negative_weights: bool,
    components: usize,
    bounds: Option<[f64; 4]>,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, CliError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(SessionConfig::from_json_str(&text)?)
        }
        None => Ok(SessionConfig::default()),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn input_format(input: &InputArgs) -> Result<Format, CliError> {
    if let Some(f) = input.format {
        return Ok(f.into());
    }
    Format::from_path(&input.path).ok_or_else(|| {
        CliError::Usage(format!(
            "cannot infer the format of {}; pass --input-format json|csv",
            input.path.display()
        ))
    })
}

fn output_format(output: &OutputArgs) -> Format {
    output
        .output_format
        .map(Format::from)
        .or_else(|| output.out.as_deref().and_then(Format::from_path))
        .unwrap_or(Format::Json)
}

fn load_session(config: SessionConfig, input: &InputArgs) -> Result<Session, CliError> {
    let format = input_format(input)?;
    let text = read_input(&input.path)?;
    let mut session = Session::new(config)?;
    session.import(&text, format)?;
    Ok(session)
}

fn write_text(out: Option<&Path>, text: &str) -> Result<(), CliError> {
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn write_graph(session: &Session, output: &OutputArgs) -> Result<(), CliError> {
    let text = match output_format(output) {
        Format::Json => trellis_core::codec::json::encode_pretty(session.graph())?,
        Format::Csv => session.export_csv(),
    };
    write_text(output.out.as_deref(), &text)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            kind,
            vertices,
            probability,
            min_weight,
            max_weight,
            seed,
            output,
        } => {
            if let Some(seed) = seed {
                config.random_seed = Some(seed);
            }
            let mut session = Session::new(config)?;
            let opts = GeneratorOptions {
                vertex_count: vertices,
                edge_probability: probability,
                min_weight,
                max_weight,
            };
            session.generate(kind.into(), &opts)?;
            write_graph(&session, &output)
        }
        Command::Run {
            algorithm,
            input,
            from,
            to,
            iterations,
            output,
        } => {
            if let Some(iterations) = iterations {
                config.layout.iterations = iterations;
            }
            let mut session = load_session(config, &input)?;
            if let Some(from) = from.as_deref() {
                session.select_start(from)?;
            }
            if let Some(to) = to.as_deref() {
                session.select_end(to)?;
            }

            let result = session.run_algorithm(algorithm.into());
            tracing::info!(status = ?session.status(), "algorithm finished");
            if output.out.is_some() {
                write_graph(&session, &output)?;
            }
            write_text(None, &serde_json::to_string_pretty(&result)?)?;
            if let Status::Failed { message } = session.status() {
                return Err(CliError::Algorithm(message.clone()));
            }
            Ok(())
        }
        Command::Convert { input, output } => {
            let session = load_session(config, &input)?;
            write_graph(&session, &output)
        }
        Command::Stats { input } => {
            let mut session = load_session(config, &input)?;
            let graph = session.graph();
            let mut stats = StatsOut {
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
                weighted_edges: graph.edges().iter().filter(|e| e.is_weighted()).count(),
                directed_edges: graph.edges().iter().filter(|e| e.is_directed()).count(),
                self_loops: graph.edges().iter().filter(|e| e.is_self_loop()).count(),
                total_weight: graph.total_weight(),
                has_negative_weights: graph.has_negative_weights(),
                components: 0,
                bounds: graph
                    .bounds()
                    .map(|b| [b.min_x, b.min_y, b.max_x, b.max_y]),
            };
            if let AlgorithmResult::ConnectedComponents { components } =
                session.run_algorithm(AlgorithmKind::StronglyConnected)
            {
                stats.components = components.len();
            }
            write_text(None, &serde_json::to_string_pretty(&stats)?)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
