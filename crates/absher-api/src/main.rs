//! Absher service assistant CLI and REST API entry point.
//!
//! Binary name: `absher`
//!
//! Parses CLI arguments, loads config and the synthetic dataset, then
//! dispatches to the appropriate command handler or starts the REST API
//! server.

mod cli;
mod http;
mod state;

use std::time::Duration;

use clap::Parser;
use clap_complete::generate;

use absher_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands};
use state::AppState;

/// How often idle sessions are looked for while serving.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: cli.log_json,
        enable_otel: cli.otel,
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "absher", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Services => cli::service::list_services(&state, cli.json)?,

        Commands::Service { tag } => cli::service::show_service(&state, &tag, cli.json)?,

        Commands::Users { tag, limit } => cli::user::list_users(&state, &tag, limit, cli.json)?,

        Commands::Classify { query } => cli::chat::classify(&state, &query, cli.json)?,

        Commands::Ask { query, llm } => cli::chat::ask(&state, &query, llm, cli.json).await?,

        Commands::Compare => cli::service::compare(cli.json)?,

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Absher API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!(
                "  {} {} users loaded, OTP verification: {:?}",
                console::style("•").dim(),
                state.directory.len(),
                state.verification_mode()
            );
            let provider = state.gateway.provider();
            println!(
                "  {} Assistant endpoint: {}{}",
                console::style("•").dim(),
                provider.endpoint(),
                if provider.has_api_key() { "" } else { " (no API token set)" }
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let shutdown = state.shutdown.clone();
            let sweeper = state.spawn_session_sweeper(
                SESSION_SWEEP_INTERVAL,
                Duration::from_secs(state.config.server.session_idle_secs),
            );
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_signal().await;
                    // In-flight assistant calls end with `Cancelled`.
                    shutdown.cancel();
                })
                .await?;
            // Stops once the shutdown token is cancelled.
            if let Err(e) = sweeper.await {
                tracing::warn!("session sweeper ended abnormally: {e}");
            }

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
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
                tracing::error!("failed to install SIGTERM handler: {e}");
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
