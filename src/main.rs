use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error_format;
mod init;
mod search;
mod syntax;
mod tree;

use config::Config;
use init::init_config;
use search::{
    SearchContext, interactive_search, list_symbols, search_symbols, show_stats, show_symbol,
};
use tree::show_tree;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "symdex")]
#[command(about = "Search the symbol index of generated documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Search data directory (overrides search_dir in symdex.toml)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Use the bundled sample search data
    #[arg(long, global = true)]
    sample: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find symbols whose name contains the query
    Search {
        query: String,
        /// Maximum number of results (defaults to max_results from symdex.toml)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every documented location of a symbol
    Show {
        symbol: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all symbols
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show symbols grouped by the file that defines them
    Tree,
    /// Show index statistics
    Stats,
    /// Start an interactive search session
    Interactive,
    /// Initialize a new symdex.toml configuration file
    Init {
        /// Overwrite existing symdex.toml if present
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "symdex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SYMDEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { force } => init_config(force),
        command => {
            let mut config = Config::load();

            // CLI flag overrides config file
            if let Some(dir) = cli.dir {
                config.search_dir = dir;
            }

            SearchContext::open(config, cli.sample, cli.verbose)
                .and_then(|mut ctx| run_command(&mut ctx, command))
        }
    };

    if let Err(e) = result {
        eprintln!("\n{} {}", "❌".red(), e.red());
        std::process::exit(1);
    }
}

fn run_command(ctx: &mut SearchContext, command: Commands) -> Result<(), String> {
    match command {
        Commands::Search { query, limit, json } => search_symbols(ctx, &query, limit, json),
        Commands::Show { symbol, json } => show_symbol(ctx, &symbol, json),
        Commands::List { json } => list_symbols(ctx, json),
        Commands::Tree => show_tree(ctx),
        Commands::Stats => show_stats(ctx),
        Commands::Interactive => interactive_search(ctx),
        // Handled in main, before any search data is loaded.
        Commands::Init { .. } => unreachable!("init does not open a search context"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["symdex", "search", "uartg", "--sample", "-l", "5"]);
        assert!(cli.sample);
        match cli.command {
            Commands::Search { query, limit, json } => {
                assert_eq!(query, "uartg");
                assert_eq!(limit, Some(5));
                assert!(!json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_init_parses_without_search_flags() {
        let cli = Cli::parse_from(["symdex", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init { force: true }));
        assert!(!cli.sample);
        assert!(cli.dir.is_none());
    }

    #[test]
    fn test_run_command_on_sample() {
        let mut ctx = SearchContext::open(Config::default(), true, false).unwrap();
        assert!(run_command(&mut ctx, Commands::Stats).is_ok());
        assert!(run_command(&mut ctx, Commands::Tree).is_ok());
        assert!(
            run_command(
                &mut ctx,
                Commands::Show {
                    symbol: "ucHour".to_string(),
                    json: true
                }
            )
            .is_ok()
        );
    }
}
