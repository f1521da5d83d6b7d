mod app;
mod constants;
mod handlers;
mod render;

use anyhow::Context;
use app::ToastDaemon;
use constants::CHANNEL_BUFFER_SIZE;
use handlers::{Input, Output, parse_command};
use render::{StaticHost, TracingRenderer};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{Receiver, Sender, channel};
use toast_stack_core::StackManager;
use toast_stack_config::ToastsConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    init_logging();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from));
    info!(
        "Starting toast-stack: {} toasts at {}",
        config.maximum_on_screen, config.position
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .context("Failed to build the tokio runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: ToastsConfig) -> anyhow::Result<()> {
    let (input_tx, input_rx) = channel(CHANNEL_BUFFER_SIZE);
    let (output_tx, output_rx) = channel(CHANNEL_BUFFER_SIZE);

    let manager = StackManager::new(config, TracingRenderer, StaticHost::default());
    let daemon = tokio::spawn(ToastDaemon::new(manager, output_tx).run(input_rx));
    let printer = tokio::spawn(print_outputs(output_rx));

    read_commands(input_tx).await?;

    daemon.await.context("Event loop panicked")?;
    printer.await.context("Output task panicked")??;
    Ok(())
}

/// Forward stdin lines to the event loop until EOF or `quit`.
async fn read_commands(tx: Sender<Input>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_command(&line) {
            Ok(input) => {
                let quit = input == Input::Quit;
                if tx.send(input).await.is_err() || quit {
                    break;
                }
            }
            Err(handlers::CommandError::Empty) => {}
            Err(err) => warn!("{}", err),
        }
    }
    Ok(())
}

/// Write every output as one JSON line.
async fn print_outputs(mut rx: Receiver<Output>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(output) = rx.recv().await {
        let mut line = serde_json::to_vec(&output).context("Failed to encode output")?;
        line.push(b'\n');
        stdout.write_all(&line).await.context("Failed to write stdout")?;
        stdout.flush().await.context("Failed to flush stdout")?;
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> ToastsConfig {
    let Some(path) = path else {
        return ToastsConfig::default();
    };
    match ToastsConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            error!("{}, using defaults", err);
            ToastsConfig::default()
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    #[cfg(feature = "systemd")]
    if let Ok(journald) = tracing_journald::layer() {
        _ = tracing_subscriber::registry()
            .with(journald.with_syslog_identifier(toast_stack_config::ID.to_string()))
            .with(filter)
            .try_init();
        return;
    }

    _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
