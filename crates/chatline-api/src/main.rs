//! Chatline backend and terminal client entry point.
//!
//! Binary name: `chatline`
//!
//! Parses CLI arguments, sets up tracing, then either starts the REST API
//! server or runs one of the client commands against a running backend.

mod cli;
mod client;
mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;

use chatline_infra::config::{
    DEFAULT_CONFIG_FILE, api_key_from_env, apply_env_overrides, load_config, process_env,
};
use chatline_observe::tracing_setup::{LogFormat, filter_for_verbosity, init_tracing};

use cli::{Cli, Commands};
use client::ChatClient;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log lines would tear the full-screen chat, so it only logs errors.
    let quiet = cli.quiet || matches!(cli.command, Commands::Chat { .. });
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(filter_for_verbosity(cli.verbose, quiet), format)
        .map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Serve { host, port } => {
            let config_path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            let mut config = load_config(&config_path).await;
            apply_env_overrides(&mut config, process_env);
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let state = AppState::init(&config, api_key_from_env(process_env));

            let addr = format!("{}:{}", config.host, config.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Chatline backend listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!(
                "  {} {} ({})",
                console::style("LLM").dim(),
                console::style(state.chat_service.provider_name()).bold(),
                config.llm.model,
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Chat { url } => {
            cli::chat::loop_runner::run_chat_loop(ChatClient::new(&url)).await?;
        }

        Commands::History { url } => {
            cli::conversation::show_history(&ChatClient::new(&url), cli.json).await?;
        }

        Commands::Send { content, url } => {
            cli::conversation::send_message(&ChatClient::new(&url), &content, cli.json).await?;
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
