use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use call_script::channels::run_cli;
use call_script::config::AppConfig;
use call_script::error::{ConfigError, Result};
use call_script::session::{SessionManager, session_routes};
use call_script::wizard::{CopyFeedback, Wizard};

const LOG_FILE_PREFIX: &str = "call-script.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Keep the guard alive so buffered file logs flush on exit.
    let _log_guard = init_tracing(&config)?;

    eprintln!("📞 Call Script v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Session WS: ws://0.0.0.0:{}/ws", config.port);
    eprintln!("   Session API: http://0.0.0.0:{}/api/session", config.port);
    eprintln!(
        "   Reset confirmation: {}",
        if config.confirm_reset { "on" } else { "off" }
    );
    if let Some(dir) = &config.log_dir {
        eprintln!("   Logs: {}", dir.display());
    }

    let wizard = Wizard::new().with_reset_confirmation(config.confirm_reset);
    let manager = SessionManager::new(wizard, CopyFeedback::from_millis(config.copy_feedback_ms));

    let app = session_routes(manager.clone()).layer(CorsLayer::permissive());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    let port = config.port;
    tokio::spawn(async move {
        tracing::info!(port, "Session server started");
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Session server stopped");
        }
    });

    if config.cli_enabled {
        eprintln!("   Type 'help' for commands. 'quit' to exit.\n");
        tokio::select! {
            result = run_cli(manager) => result?,
            _ = tokio::signal::ctrl_c() => {}
        }
    } else {
        eprintln!("   CLI: disabled (Ctrl-C to stop)\n");
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(ConfigError::Io)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
