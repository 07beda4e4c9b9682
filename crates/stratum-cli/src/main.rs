mod svg;

use std::io::Read;
use std::num::NonZeroUsize;
use stratum::graphlib::{self, Graph, GraphBuilder, ManifestCatalog, UnitCatalog, alg, codec};
use stratum::{Layout, LayoutOptions, RankDir};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io { path: String, err: std::io::Error },
    Input { path: String, err: graphlib::Error },
    Config { path: String, err: serde_json::Error },
    Graph(graphlib::Error),
    Layout(stratum::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io { path, err } => write!(f, "{path}: I/O error: {err}"),
            CliError::Input { path, err } => write!(f, "{path}: {err}"),
            CliError::Config { path, err } => write!(f, "{path}: invalid layout config: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<graphlib::Error> for CliError {
    fn from(value: graphlib::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<stratum::Error> for CliError {
    fn from(value: stratum::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Build,
    Check,
    Render,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    scope: Option<String>,
    script_var: Option<String>,
    pretty: bool,
    reverse: bool,
    collapse: Option<NonZeroUsize>,
    rankdir: Option<RankDir>,
    config: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Layout,
            input: None,
            out: None,
            scope: None,
            script_var: None,
            pretty: false,
            reverse: true,
            collapse: None,
            rankdir: None,
            config: None,
        }
    }
}

fn usage() -> &'static str {
    "stratum\n\
\n\
USAGE:\n\
  stratum build [--scope <name>] [--script <var>] [--pretty] [--out <path>] [<manifest>|-]\n\
  stratum layout [--no-reverse] [--collapse <n>] [--rankdir TB|BT|LR|RL] [--config <path>] [--script <var>] [--pretty] [--out <path>] [<graph>|-]\n\
  stratum check [<graph>|-]\n\
  stratum render [--no-reverse] [--collapse <n>] [--rankdir TB|BT|LR|RL] [--config <path>] [--out <path>] [<graph>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin; output goes to stdout unless --out is given.\n\
  - build reads a unit manifest ({\"unit\": [\"reference\", ...]}) and writes the validated graph.\n\
    Without --scope every unit is included and references must stay inside the manifest;\n\
    with --scope only the scope's units are included and references leaving it are dropped.\n\
  - layout reverses the graph by default so dependencies sit on the first layer.\n\
  - --collapse <n> merges units to their first <n> '/'-separated path segments.\n\
  - Set RUST_LOG (e.g. RUST_LOG=stratum=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "build" => args.command = Command::Build,
            "layout" => args.command = Command::Layout,
            "check" => args.command = Command::Check,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--no-reverse" => args.reverse = false,
            "--scope" => {
                let Some(scope) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !scope.trim().is_empty() {
                    args.scope = Some(scope.trim().to_string());
                }
            }
            "--script" => {
                let Some(var) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.script_var = Some(var.clone());
            }
            "--collapse" => {
                let Some(depth) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.collapse = Some(
                    depth
                        .parse::<NonZeroUsize>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--rankdir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.rankdir = Some(
                    dir.parse::<RankDir>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn input_name(input: Option<&str>) -> String {
    match input {
        None | Some("-") => "<stdin>".to_string(),
        Some(path) => path.to_string(),
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    let io_err = |err| CliError::Io {
        path: input_name(input),
        err,
    };
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).map_err(io_err),
    }
}

fn read_graph(input: Option<&str>) -> Result<Graph, CliError> {
    let text = read_input(input)?;
    codec::decode(&text).map_err(|err| CliError::Input {
        path: input_name(input),
        err,
    })
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => std::fs::write(path, text).map_err(|err| CliError::Io {
            path: path.to_string(),
            err,
        }),
    }
}

fn load_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        None => LayoutOptions::default(),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|err| CliError::Io {
                path: path.to_string(),
                err,
            })?;
            serde_json::from_str(&text).map_err(|err| CliError::Config {
                path: path.to_string(),
                err,
            })?
        }
    };
    if let Some(rankdir) = args.rankdir {
        opts.rankdir = rankdir;
    }
    Ok(opts)
}

fn build(args: &Args) -> Result<String, CliError> {
    let text = read_input(args.input.as_deref())?;
    let manifest = codec::decode(&text).map_err(|err| CliError::Input {
        path: input_name(args.input.as_deref()),
        err,
    })?;
    let catalog = ManifestCatalog::from(manifest);

    let g = match args.scope.as_deref() {
        None => GraphBuilder::global(&catalog).build()?,
        Some(scope) => {
            let units = catalog.scope(scope)?;
            GraphBuilder::scoped(&catalog, units).build()?
        }
    };

    Ok(match (&args.script_var, args.pretty) {
        (Some(var), _) => codec::encode_script(&g, var)?,
        (None, true) => codec::encode_pretty(&g)? + "\n",
        (None, false) => codec::encode(&g)? + "\n",
    })
}

fn compute_layout(args: &Args) -> Result<Layout, CliError> {
    let input = args.input.as_deref();
    let g = read_graph(input)?;
    g.validate().map_err(|err| CliError::Input {
        path: input_name(input),
        err,
    })?;

    let g = match args.collapse {
        Some(depth) => g.collapse(depth),
        None => g,
    };
    let g = if args.reverse { g.reverse() } else { g };

    let opts = load_options(args)?;
    Ok(stratum::layout(&g, &opts)?)
}

fn layout(args: &Args) -> Result<String, CliError> {
    let layout = compute_layout(args)?;
    Ok(match (&args.script_var, args.pretty) {
        (Some(var), _) => stratum::codec::encode_script(&layout, var)?,
        (None, true) => stratum::codec::encode_pretty(&layout)? + "\n",
        (None, false) => stratum::codec::encode(&layout)? + "\n",
    })
}

fn check(args: &Args) -> Result<String, CliError> {
    let input = args.input.as_deref();
    let g = read_graph(input)?;
    g.validate().map_err(|err| CliError::Input {
        path: input_name(input),
        err,
    })?;

    let mut report = format!(
        "ok: {} nodes, {} edges\n",
        g.node_count(),
        g.edge_count()
    );
    for cycle in alg::find_cycles(&g) {
        report.push_str("cycle: ");
        report.push_str(&cycle.join(", "));
        report.push('\n');
    }
    Ok(report)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = match args.command {
        Command::Build => build(&args)?,
        Command::Layout => layout(&args)?,
        Command::Check => check(&args)?,
        Command::Render => svg::render(&compute_layout(&args)?),
    };
    write_text(&text, args.out.as_deref())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
