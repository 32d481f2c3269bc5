//! User Service - HTTP server for user records.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::config::UserServiceConfig;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User records service backed by Redis")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Redis address (`redis://host:port` or `host:port`)
    #[arg(long, global = true)]
    redis_url: Option<String>,

    /// Redis password
    #[arg(long, global = true)]
    redis_password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Load the demo users before serving
        #[arg(long)]
        seed: bool,
        /// Use an in-process store instead of Redis
        #[arg(long)]
        in_memory: bool,
    },
    /// Load the demo users into the store and exit
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = UserServiceConfig::from_env();
    if let Some(url) = cli.redis_url {
        config.store.url = url;
    }
    if let Some(password) = cli.redis_password {
        config.store.password = Some(password).filter(|p| !p.is_empty());
    }
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve {
            host,
            port,
            seed,
            in_memory,
        } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            config.seed_demo_data |= seed;
            config.in_memory |= in_memory;
            user_service_lib::run_server(config).await?;
        }
        Commands::Seed => {
            user_service_lib::run_seed(config).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,tower_http=debug".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
