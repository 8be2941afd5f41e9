//! SupportBot CLI and REST API entry point.
//!
//! Binary name: `supportbot`
//!
//! Loads `.env` and the TOML config, initializes tracing, wires the chat
//! service, then either serves the REST API or runs the terminal chat loop.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing so `.env` can supply clap's env-backed flags. A missing file is normal.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Shell completions don't need config or tracing
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "supportbot", &mut std::io::stdout());
        return Ok(());
    }

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,supportbot=info",
        1 => "info,supportbot=debug",
        _ => "trace",
    };
    supportbot_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = supportbot_infra::config::load_service_config(&cli.config).await;
    let result = run(cli, config).await;

    supportbot_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    mut config: supportbot_types::config::ServiceConfig,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            let addr = format!("{}:{}", config.server.host, config.server.port);

            let state = AppState::init(config).await?;
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "REST API listening");

            if !cli.quiet {
                println!();
                println!(
                    "  {} REST API server running at {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!(
                    "  {} {} products, default model {}",
                    console::style("•").dim(),
                    state.chat_service.catalog().len(),
                    console::style(state.default_model()).dim()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Chat { model } => {
            let state = AppState::init(config).await?;
            cli::chat::run_chat(&state, model).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
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

    tracing::info!("Shutdown signal received");
}
