use anyhow::Context;
use clap::Parser;
use starboard_backend_lib::{
    config::{Settings, DEFAULT_CONFIG_FILE},
    router,
    storage::PgStore,
    AppState,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Starboard API server
#[derive(Parser, Debug)]
#[command(name = "starboard", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Keep users and favorites in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // A missing signing secret stops the process here
    let mut settings = Settings::load_from(&args.config).context("failed to load settings")?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }

    init_tracing(&settings);

    let state = if args.in_memory {
        tracing::warn!("using in-memory store, data is lost on shutdown");
        AppState::in_memory(settings.clone())?
    } else {
        let url = settings
            .database_url
            .clone()
            .context("database_url is required unless --in-memory is given")?;
        let store = Arc::new(PgStore::connect(&url).await?);
        store.migrate().await?;
        AppState::new(settings.clone(), store.clone(), store)?
    };

    let app = router::create_router(Arc::new(state));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if settings.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
