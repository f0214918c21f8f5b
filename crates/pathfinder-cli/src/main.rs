//! PathFinder CLI - Command line interface for the weighted graph service

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, edge, node, query, seed, serve};
use config::{Backend, Config};
use output::OutputFormat;
use pathfinder_core::{Node, NodeId};
use pathfinder_storage::{MemoryStorage, StorageBackend};

#[derive(Parser)]
#[command(name = "pathfinder")]
#[command(author, version, about = "Weighted directed graph store with BFS and shortest paths")]
pub struct Cli {
    /// Data directory
    #[arg(short, long, env = "PATHFINDER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage nodes
    Node(node::NodeArgs),
    /// Manage edges
    Edge(edge::EdgeArgs),
    /// Breadth-first traversal from a node
    Bfs(query::BfsArgs),
    /// Shortest path between two nodes
    Path(query::PathArgs),
    /// Load nodes and edges from CSV files
    Seed(seed::SeedArgs),
    /// Start the HTTP API
    Serve(serve::ServeArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with storage backend
pub struct AppContext {
    pub storage: Arc<dyn StorageBackend>,
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl AppContext {
    pub async fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
        let backend = cli.backend.unwrap_or(config.backend);

        let storage = open_storage(backend, &data_dir)?;
        storage.initialize().await?;

        Ok(Self {
            storage,
            config,
            format: cli.format,
            quiet: cli.quiet,
        })
    }

    /// Print a line unless `--quiet` was given
    pub fn say(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    /// Resolve a node given by id or by name
    ///
    /// A numeric reference that matches no id is retried as a name, so
    /// nodes named like numbers stay reachable.
    pub async fn find_node(&self, reference: &str) -> anyhow::Result<Option<Node>> {
        if let Ok(id) = reference.parse::<NodeId>() {
            if let Some(node) = self.storage.get_node(id).await? {
                return Ok(Some(node));
            }
        }
        Ok(self.storage.get_node_by_name(reference.trim()).await?)
    }

    /// Like [`find_node`](Self::find_node), failing when nothing matches
    pub async fn require_node(&self, reference: &str) -> anyhow::Result<Node> {
        self.find_node(reference)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Node '{}' not found", reference))
    }

    /// Id to hand to a query; unknown numeric ids pass through
    pub async fn query_node_id(&self, reference: &str) -> anyhow::Result<NodeId> {
        if let Some(node) = self.find_node(reference).await? {
            return Ok(node.id);
        }
        match reference.parse::<NodeId>() {
            Ok(id) => Ok(id),
            Err(_) => anyhow::bail!("Node '{}' not found", reference),
        }
    }
}

fn open_storage(
    backend: Backend,
    data_dir: &std::path::Path,
) -> anyhow::Result<Arc<dyn StorageBackend>> {
    let storage: Arc<dyn StorageBackend> = match backend {
        Backend::Memory => {
            tracing::debug!("Using in-memory storage");
            Arc::new(MemoryStorage::new())
        }
        #[cfg(feature = "redb")]
        Backend::Redb => {
            std::fs::create_dir_all(data_dir)?;
            let db_path = data_dir.join("pathfinder.redb");
            tracing::debug!("Using database at: {:?}", db_path);
            Arc::new(pathfinder_storage::RedbStorage::open(&db_path)?)
        }
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            std::fs::create_dir_all(data_dir)?;
            let db_path = data_dir.join("pathfinder.db");
            tracing::debug!("Using database at: {:?}", db_path);
            Arc::new(pathfinder_storage::SqliteStorage::open(&db_path)?)
        }
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("Backend '{}' is not enabled in this build", other),
    };
    Ok(storage)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting pathfinder CLI");

    // Commands that never touch storage
    match &cli.command {
        Commands::Config(args) => return config_cmd::run(args),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli, Config::load()).await?;

    match &cli.command {
        Commands::Node(args) => node::run(args, &ctx).await?,
        Commands::Edge(args) => edge::run(args, &ctx).await?,
        Commands::Bfs(args) => query::run_bfs(args, &ctx).await?,
        Commands::Path(args) => query::run_path(args, &ctx).await?,
        Commands::Seed(args) => seed::run(args, &ctx).await?,
        Commands::Serve(args) => serve::run(args, &ctx).await?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    ctx.storage.close().await?;
    Ok(())
}
