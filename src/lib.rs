// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use application::{FlashcardGenerator, GenerationSettings};
use domain::{FlashcardRequest, GenerationResult};
use infrastructure::{Config, OpenAiClient};
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::{debug, info, warn};

use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting flashgen with arguments");

    // Initialize infrastructure
    let mut config = Config::resolve(args.config.as_deref())?;
    let client = build_client(&config)?;

    match args.command {
        Command::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let generator = build_generator(client, &config);
            serve(generator, &config.address()).await
        }
        Command::Generate {
            text,
            front_color,
            back_color,
            json,
        } => {
            let generator = build_generator(client, &config);
            let request = FlashcardRequest {
                prompt: text,
                front_color,
                back_color,
            };

            info!("Generating flashcards");
            let result = generator.generate(&request).await?;
            print_result(&result, json)
        }
    }
}

pub fn build_client(config: &Config) -> Result<OpenAiClient> {
    Ok(OpenAiClient::new(&config.completion.endpoint)?
        .with_organization(config.completion.organization.clone())
        .with_project(config.completion.project.clone()))
}

pub fn build_generator(client: OpenAiClient, config: &Config) -> FlashcardGenerator<OpenAiClient> {
    let settings = GenerationSettings::new(
        config.completion.api_key.clone(),
        config.completion.model.clone(),
    );
    FlashcardGenerator::new(client, settings)
}

async fn serve(generator: FlashcardGenerator<OpenAiClient>, address: &str) -> Result<()> {
    let app = ports::router(Arc::new(generator));

    info!("Binding to {address}");
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

fn print_result(result: &GenerationResult, json: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        let rendered =
            serde_json::to_string_pretty(result).context("Failed to serialize flashcards")?;
        writeln!(stdout, "{rendered}")?;
    } else {
        for record in result.records() {
            writeln!(stdout, "{} | {}", record.front, record.back)?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_signal("Ctrl+C", Ok(ctrl_c()));

    #[cfg(unix)]
    let terminate = async {
        let installed = signal::unix::signal(signal::unix::SignalKind::terminate())
            .map(|mut stream| async move {
                stream.recv().await;
                Ok::<(), std::io::Error>(())
            });
        wait_for_signal("terminate", installed).await
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Resolve once the signal arrives; park forever if its handler could not be installed.
async fn wait_for_signal<F>(name: &str, installed: std::io::Result<F>)
where
    F: Future<Output = std::io::Result<()>>,
{
    let received = match installed {
        Ok(signal) => signal.await,
        Err(e) => Err(e),
    };

    match received {
        Ok(()) => info!("Received {name} signal, shutting down"),
        Err(e) => {
            warn!(error = %e, "Failed to install {name} handler");
            std::future::pending::<()>().await
        }
    }
}
