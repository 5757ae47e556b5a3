//! Vigil CLI and REST API entry point.
//!
//! Binary name: `vgl`
//!
//! Parses CLI arguments, wires the engine to its HTTP collaborators, then
//! dispatches to the appropriate command handler or starts the REST API
//! server.

mod cli;
mod config;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,vigil=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "vgl", &mut std::io::stdout());
        return Ok(());
    }

    let hub_config = config::load()?;
    let state = AppState::init(hub_config);

    match cli.command {
        Commands::Run {
            workflow_id,
            file,
            context,
        } => {
            cli::workflow::run(
                &state,
                workflow_id.as_deref(),
                file.as_deref(),
                &context,
                cli.json,
            )
            .await?;
        }

        Commands::Workflows => {
            cli::workflow::list(cli.json)?;
        }

        Commands::Services => {
            cli::services::services(&state, cli.json).await?;
        }

        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| state.config.listen_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Vigil hub listening on {}",
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

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
