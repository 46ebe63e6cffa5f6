//! Gitinfo backend server.

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use gitinfo::{config::Config, create_app_with_config, state::AppState};

/// Gitinfo - build metadata management endpoints
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Prefix under which the management endpoints are mounted
    #[arg(long)]
    management_prefix: Option<String>,

    /// Path to the bundled git.properties resource
    #[arg(long)]
    properties_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::from_figment(args.port, args.management_prefix, args.properties_path)?;

    // Initialize logging - use the configured level, RUST_LOG, or default to info
    let filter = match &config.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact());
    let _guard = match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "gitinfo.log".into());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    };

    info!("Configuration loaded");

    // Probe the properties resource once; handlers re-read it per request
    let state = AppState::from_config(&config);
    if state.git_properties().is_some() {
        info!(
            "Git properties resource loaded from {}",
            config.properties_path.display()
        );
    } else {
        info!(
            "No git properties resource at {}",
            config.properties_path.display()
        );
    }

    let app = create_app_with_config(
        state,
        &config.management_prefix,
        config.cors_allowed_origins.clone(),
    );

    // Start server - bind to 0.0.0.0 to be accessible from all interfaces
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Set up graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
