//! BharatAI CLI and REST API entry point.
//!
//! Binary name: `bharatai`
//!
//! Parses CLI arguments, loads the router config and provider chains, then
//! dispatches to the appropriate command or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;

use bharatai_observe::tracing_setup::{self, OTEL_ENV};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = cli.log_filter();
    let otel = tracing_setup::otel_requested(std::env::var(OTEL_ENV).ok().as_deref());
    tracing_setup::init_tracing(filter, otel).map_err(|e| anyhow::anyhow!("tracing init failed: {e}"))?;

    let result = run(cli).await;
    tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} BharatAI API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Ask { prompt } => {
            cli::query::ask(&state, prompt, cli.json).await?;
        }

        Commands::Market { location } => {
            cli::query::market(&state, location, cli.json).await?;
        }

        Commands::Providers => {
            cli::providers::list_providers(&state, cli.json)?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
