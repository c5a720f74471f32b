use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{FileRouteSource, HttpRouteSource, RouteQuery, RouteSource, parse_seed};
use crate::config::Config;
use crate::model::Algorithm;

#[derive(Parser)]
#[command(name = "freightmap")]
#[command(author, version, about)]
#[command(long_about = "Interactive map viewer for fuel-aware freight routes.\n\n\
    Queries a routing service for a graph of locations and an optimized route,\n\
    then draws the graph, the route and the shortest-distance baseline.\n\n\
    Examples:\n  \
    freightmap                               Open the map (dijkstra, seed 42)\n  \
    freightmap --algorithm astar --seed 7    Open the map with other settings\n  \
    freightmap route --start \"Phoenix, AZ\"   Print a route summary\n  \
    freightmap --response saved.json         Show a saved response")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Flags shared by every command that queries the routing service.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Path-finding algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Graph seed (blank or non-numeric falls back to 42)
    #[arg(long)]
    pub seed: Option<String>,

    /// Start location id (defaults to the service's choice)
    #[arg(long)]
    pub start: Option<String>,

    /// Goal location id (defaults to the service's choice)
    #[arg(long)]
    pub goal: Option<String>,

    /// Routing service base URL (overrides FREIGHTMAP_API_URL and config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Read a saved JSON response instead of calling the service
    #[arg(long, value_name = "FILE")]
    pub response: Option<PathBuf>,
}

impl QueryArgs {
    /// Build the route query, falling back to configured defaults.
    pub fn to_query(&self, config: &Config) -> RouteQuery {
        let seed = match &self.seed {
            Some(text) => parse_seed(text),
            None => config
                .default_seed()
                .unwrap_or(crate::client::DEFAULT_SEED),
        };
        RouteQuery {
            algorithm: self.algorithm.unwrap_or_else(|| config.default_algorithm()),
            seed,
            start: self.start.clone(),
            goal: self.goal.clone(),
        }
    }

    pub fn source(&self, config: &Config) -> Arc<dyn RouteSource> {
        match &self.response {
            Some(path) => Arc::new(FileRouteSource::new(path.clone())),
            None => Arc::new(HttpRouteSource::new(
                &config.resolve_api_url(self.api_url.as_deref()),
            )),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive map (default)
    View {
        #[command(flatten)]
        query: QueryArgs,

        /// Launch in a window instead of fullscreen
        #[arg(long)]
        windowed: bool,
    },

    /// Fetch a route once and print its summary
    Route {
        #[command(flatten)]
        query: QueryArgs,

        /// Pick start and goal interactively from the fetched locations
        #[arg(long)]
        pick: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. api.base_url, defaults.algorithm, defaults.seed, defaults.theme)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::View { query, windowed }) => crate::app::run(&query, windowed),
            Some(Commands::Route { query, pick }) => crate::commands::route::run(&query, pick),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("freightmap {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => crate::app::run(&self.query, self.windowed),
        }
    }
}
