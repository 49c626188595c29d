use anyhow::Result;
use clap::Parser;
use nupm::commands;
use nupm::manager::ManagerOptions;
use nupm::runtime::RealRuntime;
use std::path::PathBuf;

/// nupm - NuGet dependency manager for project.json
///
/// Searches a NuGet v3 feed and keeps the dependencies section of the
/// project manifest in sync.
///
/// If the NUPM_FEED_TOKEN environment variable is set, it will be sent as a
/// bearer token on feed requests. This is useful for private feeds.
///
/// Examples:
///   nupm search serilog       # Search the feed for packages
///   nupm add Serilog 2.0.0    # Record a dependency in project.json
#[derive(Parser, Debug)]
#[command(author, version = env!("NUPM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root containing project.json (also via NUPM_PROJECT_ROOT)
    #[arg(
        long = "project-root",
        short = 'C',
        env = "NUPM_PROJECT_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub project_root: Option<PathBuf>,

    /// Feed service index URL (defaults to https://api.nuget.org/v3/index.json)
    #[arg(long = "feed-url", env = "NUPM_FEED_URL", value_name = "URL", global = true)]
    pub feed_url: Option<String>,

    /// Skip all network access; searches resolve empty
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search the feed for packages
    Search(SearchArgs),

    /// Add or update a dependency in project.json
    Add(AddArgs),

    /// Remove a dependency from project.json
    Remove(RemoveArgs),

    /// List the dependencies declared in project.json
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// The term to search the feed for
    #[arg(value_name = "TERM")]
    pub term: String,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// The package id
    #[arg(value_name = "ID")]
    pub id: String,

    /// The package version (omit for "any")
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// The package id
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let options = ManagerOptions {
        feed_url: cli.feed_url,
        project_root: cli.project_root,
        offline: cli.offline,
    };

    match cli.command {
        Commands::Search(args) => commands::search(&runtime, &args.term, options).await?,
        Commands::Add(args) => {
            commands::add(&runtime, &args.id, args.version.as_deref(), options).await?
        }
        Commands::Remove(args) => commands::remove(&runtime, &args.id, options).await?,
        Commands::List(_args) => commands::list(&runtime, options)?,
    }
    Ok(())
}
