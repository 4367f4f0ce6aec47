//! opengen - resolve the endpoints of an API schema tree for one target
//! language and print the endpoint groups as JSON.
//!
//! Logs go to stderr; `RUST_LOG` overrides the default `info` level.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use opengen_core::{
    ApiTree, Config, GenerateError, KNOWN_TARGETS, generate_endpoints, resolve_target,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "opengen", version, about = "Resolve API endpoints for a target language")]
struct Args {
    /// Target language (kotlin, rust, swift, typescript, or an alias such as `ts`)
    #[arg(short, long)]
    target: String,

    /// Schema tree, JSON or YAML
    #[arg(short, long)]
    input: PathBuf,

    /// Generation config (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opengen=info,opengen_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String, String> {
    let config = match &args.config {
        Some(path) => Config::from_path(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };

    let tree = load_tree(&args.input)?;

    let target = resolve_target(&args.target, config.clone()).map_err(|e| match e {
        GenerateError::UnknownTarget(_) => {
            format!("{e} (known targets: {})", KNOWN_TARGETS.join(", "))
        }
        other => other.to_string(),
    })?;

    let groups = generate_endpoints(&tree, target.as_ref(), &config).map_err(|e| e.to_string())?;
    let endpoints: usize = groups.iter().map(|g| g.endpoints.len()).sum();
    info!(
        target_name = target.name(),
        groups = groups.len(),
        endpoints,
        "Generated endpoints."
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&groups)
    } else {
        serde_json::to_string(&groups)
    };
    output.map_err(|e| format!("Failed to serialize endpoints: {e}"))
}

fn load_tree(path: &Path) -> Result<ApiTree, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let tree = if is_json {
        ApiTree::from_json(&text)
    } else {
        ApiTree::from_yaml(&text)
    };
    tree.map_err(|e| format!("{}: {e}", path.display()))
}
