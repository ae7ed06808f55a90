//! CLI entrypoint for docchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use docchat_application::{ChatApi, SendMessageUseCase};
use docchat_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, HttpChatApi, HttpTransport, SystemClipboard,
    TransportSettings,
};
use docchat_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, Spinner, TuiApp, TuiSettings,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter(verbose: u8) -> EnvFilter {
    // RUST_LOG wins over -v when set
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    }
}

/// Log to stderr; used when the terminal is not taken over
fn init_stderr_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a daily rolling file while the TUI owns the terminal.
///
/// The returned guard flushes the writer on drop and must outlive the UI.
fn init_file_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let directory = logging.resolve_directory()?;
    if let Err(e) = std::fs::create_dir_all(&directory) {
        eprintln!(
            "Warning: cannot create log directory {}: {}",
            directory.display(),
            e
        );
        return None;
    }

    let appender = tracing_appender::rolling::daily(&directory, "docchat.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Some(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_api(config: &FileConfig) -> Result<Arc<dyn ChatApi>> {
    let settings = TransportSettings {
        user_agent: config.server.user_agent.clone(),
        timeout: config.server.request_timeout_secs.map(Duration::from_secs),
    };
    let transport = HttpTransport::new(&config.server.base_url, settings)
        .context("Failed to set up the HTTP client")?;
    Ok(Arc::new(HttpChatApi::new(transport)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    // Held until the UI exits so buffered log lines are flushed
    let _log_guard = if cli.is_interactive() {
        init_file_logging(cli.verbose, &config.logging)
    } else {
        init_stderr_logging(cli.verbose);
        None
    };

    info!("Starting docchat against {}", config.server.base_url);

    // === Dependency Injection ===
    let api = build_api(&config)?;
    let formatter = ConsoleFormatter::new(cli.output).with_markup(config.ui.markup);

    // Session listing mode
    if cli.sessions {
        let sessions = api
            .list_sessions()
            .await
            .context("Failed to fetch chat sessions")?;
        print!("{}", formatter.format_sessions(&sessions));
        return Ok(());
    }

    // One-shot mode
    if let Some(message) = cli.message.as_deref() {
        let spinner = if cli.quiet {
            Spinner::hidden()
        } else {
            Spinner::start("Waiting for reply...")
        };

        let use_case = SendMessageUseCase::new(api);
        match use_case.execute(message).await {
            Ok(reply) => {
                spinner.clear();
                print!("{}", formatter.format_reply(&reply));
                return Ok(());
            }
            Err(e) => {
                spinner.fail("Request failed");
                warn!("One-shot request failed: {}", e);
                return Err(anyhow!("Error: Failed to get response: {}", e));
            }
        }
    }

    // Interactive mode
    let settings = TuiSettings {
        timing: config.timing.to_ui_timing(),
        narrow_width: config.ui.narrow_width,
        sidebar_open: config.ui.sidebar_open,
    };
    let mut app = TuiApp::new(api, Arc::new(SystemClipboard::new()), settings);
    app.run().await?;

    info!("docchat exited");
    Ok(())
}
