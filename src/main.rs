use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cardadvisor::{Commands, Container, ContainerConfig, FilterStrategy, Provider, Router};

#[derive(Parser)]
#[command(name = "cardadvisor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// CSV file with `card_name` and `perks_summary` columns
    #[arg(short, long, global = true, default_value = "credit_cards.csv")]
    catalog: String,

    #[arg(long, global = true, value_enum, default_value = "openai")]
    provider: Provider,

    /// Override the provider's default model
    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(long, global = true, value_enum, default_value = "keyword")]
    filter: FilterStrategy,

    /// Call the model for every question, even repeated ones
    #[arg(long, global = true)]
    no_cache: bool,

    #[arg(long, global = true, default_value = "86400")]
    cache_ttl_secs: u64,

    /// Maximum number of cards sent to the model per question
    #[arg(long, global = true, default_value = "15")]
    candidate_cap: usize,

    /// HTTP timeout for model calls
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        catalog_path: cli.catalog,
        provider: cli.provider,
        model: cli.model,
        filter: cli.filter,
        no_cache: cli.no_cache,
        cache_ttl_secs: cli.cache_ttl_secs,
        candidate_cap: cli.candidate_cap,
        timeout_secs: cli.timeout_secs,
    };
    debug!(
        "Provider {:?}, filter {:?}, cache {}",
        config.provider,
        config.filter,
        if config.no_cache { "off" } else { "on" }
    );

    let container = match cli.command {
        Commands::Cards { .. } => Container::catalog_only(&config)?,
        _ => Container::new(config)?,
    };
    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
