use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use juriste_virtuel::config::{Config, LoggingConfig};
use juriste_virtuel::services::llm::OpenAIClient;
use juriste_virtuel::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(name = "juriste-virtuel", version, about = "Juriste Virtuel legal assistant backend")]
struct Args {
    /// Path to a config.toml (default: conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let _guard = init_logging(&config.logging)?;

    tracing::info!("Juriste Virtuel v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("LLM provider: {} (model {})", config.llm.api_base, config.llm.model);
    tracing::debug!("Configuration: {:?}", config);

    let client = Arc::new(OpenAIClient::new(&config.llm));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, client));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI at http://{}/swagger-ui", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Load the configuration under a temporary stderr subscriber, so warnings
/// raised before logging is configured still reach the console.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    load_config_with(path, std::io::stderr)
}

fn load_config_with<W>(path: Option<&Path>, writer: W) -> anyhow::Result<Config>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(bootstrap, || Config::load(path))
}

/// Console output plus an optional daily-rolling log file.
/// The returned guard flushes the file writer on drop.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)?,
    };
    let console = tracing_subscriber::fmt::layer().with_target(true);

    match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "juriste-virtuel.log".into());
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);

            tracing_subscriber::registry().with(filter).with(console).with(file_layer).init();
            Ok(Some(guard))
        },
        None => {
            tracing_subscriber::registry().with(filter).with(console).init();
            Ok(None)
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
