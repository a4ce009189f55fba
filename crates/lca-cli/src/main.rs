#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use lca_core::config::{load_config, resolve_config_path};
use output::{OutputMode, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lca: lowest common ancestors in binary trees and DAGs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (defaults to pretty on a TTY, text otherwise).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (defaults to $LCA_CONFIG, then ./lca.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Queries",
        about = "LCA of two nodes in a binary tree",
        long_about = "Build a binary tree from --left/--right links and print the lowest common ancestor of two nodes, or the root-to-node path with --path.",
        after_help = "EXAMPLES:\n    # LCA of 4 and 5 under root 1\n    lca tree --root 1 --left 1:2 --right 1:3 --left 2:4 --right 2:5 4 5\n\n    # Path from the root to node 5\n    lca tree --root 1 --left 1:2 --right 2:5 --path 5"
    )]
    Tree(cmd::tree::TreeArgs),

    #[command(
        next_help_heading = "Queries",
        about = "LCA set of two nodes in a DAG",
        long_about = "Build a DAG of --nodes nodes from --edge links and print the set of lowest common ancestors of two nodes.",
        after_help = "EXAMPLES:\n    # Diamond: 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3\n    lca dag --nodes 4 --edge 0:1 --edge 0:2 --edge 1:3 --edge 2:3 1 2\n\n    # Emit machine-readable output\n    lca dag --nodes 2 --edge 0:1 0 1 --format json"
    )]
    Dag(cmd::dag::DagArgs),

    #[command(
        next_help_heading = "Queries",
        about = "List DAG roots",
        long_about = "Print every node of the DAG with no incoming edge."
    )]
    Roots(cmd::dag::RootsArgs),

    #[command(
        next_help_heading = "Queries",
        about = "Run the built-in walkthrough",
        long_about = "Print LCA results for a built-in 7-node binary tree and 5-node DAG."
    )]
    Demo,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    lca completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LCA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lca=debug,lca_core=debug,info"
        } else {
            "lca=info,warn"
        })
    });

    let format = env::var("LCA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = load_config(&config_path)?;
    debug!(path = %config_path.display(), ?config, "config loaded");

    let output = cli.output_mode();

    match cli.command {
        Commands::Tree(ref args) => cmd::tree::run_tree(args, output),
        Commands::Dag(ref args) => cmd::dag::run_dag(args, &config, output),
        Commands::Roots(ref args) => cmd::dag::run_roots(args, output),
        Commands::Demo => cmd::demo::run_demo(&config.dag, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["lca", "demo", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::Demo));
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["lca", "--json", "demo"]);
        assert!(cli.json);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn tree_accepts_negative_ids() {
        let cli = Cli::parse_from(["lca", "tree", "--root", "-1", "--left", "-1:-2", "-2", "-1"]);
        let Commands::Tree(args) = cli.command else {
            panic!("expected tree subcommand");
        };
        assert_eq!(args.root, Some(-1));
        assert_eq!(args.left, vec![(-1, -2)]);
        assert_eq!((args.a, args.b), (-2, Some(-1)));
    }

    #[test]
    fn tree_path_makes_second_id_optional() {
        let cli = Cli::parse_from(["lca", "tree", "--root", "1", "--path", "1"]);
        let Commands::Tree(args) = cli.command else {
            panic!("expected tree subcommand");
        };
        assert!(args.path);
        assert_eq!(args.b, None);
    }

    #[test]
    fn tree_requires_second_id_without_path() {
        assert!(Cli::try_parse_from(["lca", "tree", "--root", "1", "1"]).is_err());
    }

    #[test]
    fn dag_collects_edges() {
        let cli = Cli::parse_from([
            "lca", "dag", "--nodes", "3", "--edge", "0:1", "--edge", "1:2", "--strategy", "reachability", "1", "2",
        ]);
        let Commands::Dag(args) = cli.command else {
            panic!("expected dag subcommand");
        };
        assert_eq!(args.graph.nodes, 3);
        assert_eq!(args.graph.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(args.strategy, Some(cmd::dag::StrategyArg::Reachability));
    }
}
