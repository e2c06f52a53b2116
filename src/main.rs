use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sttrelay", about = "Streaming speech-to-text relay server")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured recognizer model path
    #[arg(long)]
    model_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        sttrelay_core::AppConfig::load_from_file(&cli.config)
            .with_context(|| format!("failed to load config from {:?}", cli.config))?
    } else {
        sttrelay_core::AppConfig::default()
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(model_path) = cli.model_path {
        match config.recognizer.vosk.as_mut() {
            Some(vosk) => vosk.model_path = model_path,
            None => {
                config.recognizer.vosk = Some(sttrelay_core::VoskConfig {
                    model_path,
                    sample_rate: 16000,
                })
            }
        }
    }

    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    tracing::info!("sttrelay starting");

    let registry = sttrelay_recognizer::RecognizerRegistry::new();
    tracing::info!(
        engine = %config.recognizer.engine,
        available = ?registry.list_engines(),
        "recognizer engine selected"
    );

    // Fail fast on an unknown engine instead of on the first connection.
    registry.create(&config.recognizer.engine).with_context(|| {
        format!(
            "recognizer engine '{}' is not available",
            config.recognizer.engine
        )
    })?;

    let state = sttrelay_server::AppState::from_config(registry, &config);
    let app = sttrelay_server::create_router(state);

    let addr = config.server.listen_addr().context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("speech-to-text relay running on ws://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutting down");
    Ok(())
}

/// Resolve on ctrl-c or SIGTERM so in-flight connections get a clean close.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received ctrl-c, shutting down");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}
