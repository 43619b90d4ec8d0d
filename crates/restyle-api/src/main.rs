//! restyle entry point.
//!
//! Binary name: `restyle`
//!
//! `restyle gateway` serves the HTTP rewrite gateway; `restyle bot` runs the
//! chat bot that talks to it.

mod bot;
mod cli;
mod http;
mod state;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use restyle_core::rewrite::service::REWRITE_MODEL;
use restyle_infra::config::{load_config, require_secret, OPENAI_API_KEY_VAR};
use restyle_infra::llm::openai_compat::config::openai_defaults;
use restyle_infra::llm::openai_compat::OpenAiCompatibleProvider;
use restyle_observe::tracing_setup::{init_tracing, shutdown_tracing};
use restyle_types::config::AppConfig;

use cli::{Cli, Commands};
use state::GatewayState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal in production.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_filter(), cli.otel).map_err(|e| anyhow::anyhow!(e))?;
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let config = load_config(&cli.config).await;

    let result = match cli.command {
        Commands::Gateway { host, port } => serve_gateway(&config, host, port).await,
        Commands::Bot => {
            let shutdown = CancellationToken::new();
            let trigger = shutdown.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                trigger.cancel();
            });
            bot::run(&config, shutdown).await
        }
    };

    shutdown_tracing();
    result
}

async fn serve_gateway(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let api_key = require_secret(OPENAI_API_KEY_VAR)?;
    let provider = OpenAiCompatibleProvider::new(openai_defaults(
        api_key,
        &config.openai_base_url,
        REWRITE_MODEL,
    ));
    let router = http::router::build_router(GatewayState::new(provider));

    let host = host.unwrap_or_else(|| config.gateway_host.clone());
    let port = port.unwrap_or(config.gateway_port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} restyle gateway listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
