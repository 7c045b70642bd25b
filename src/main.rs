use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dev_proxy::config::loader::load_config;
use dev_proxy::{lifecycle, DevConfig, Shutdown};

#[derive(Parser, Debug)]
#[command(version, about = "Local development server with a prefix-routed upstream proxy")]
struct Cli {
    #[clap(long, short, default_value = "dev-proxy.toml")]
    config: PathBuf,

    #[clap(long, help = "override the configured listen port")]
    port: Option<u16>,

    #[clap(long, help = "override the configured bind address")]
    bind: Option<String>,

    #[clap(long, help = "override the static asset directory")]
    static_root: Option<PathBuf>,

    #[clap(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "dev_proxy={},tower_http=info",
                cli.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        tracing::info!(path = %cli.config.display(), "no config file, using defaults");
        DevConfig::default()
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(static_root) = cli.static_root {
        config.server.static_root = static_root;
    }

    let ip: IpAddr = config.server.bind.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);

    let server = lifecycle::mount(config)?;
    let listener = TcpListener::bind(addr).await?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::signals::listen(&shutdown).await;
    });

    server.run(listener, receiver).await?;
    Ok(())
}
