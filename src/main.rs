use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use mikokuji::cleanup::{StdinConfirm, SystemTrash};
use mikokuji::cli::{Cli, Commands};
use mikokuji::commands;
use mikokuji::config::Config;
use mikokuji::picker::TerminalChooser;
use mikokuji::presenter::BrowserOpener;

const DEFAULT_LOG_FILTER: &str = "mikokuji=warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_logging(config.log_file.as_deref());
    debug!("Resolved configuration: {:?}", config);

    let status = match &cli.command {
        Commands::Get { number } => {
            commands::get(&config, *number, &mut TerminalChooser, &mut BrowserOpener)?
        }
        Commands::Update { default } => commands::update(&config, *default).await?,
        Commands::Clean => commands::clean(&config, &mut StdinConfirm, &SystemTrash)?,
    };

    Ok(status.into())
}

/// Log to stderr, and also to `log_file` when one is configured
fn init_logging(log_file: Option<&Path>) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let file_layer = log_file.map(|path| {
        let directory = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = path.file_name().unwrap_or(OsStr::new("mikokuji.log"));
        let file_appender = tracing_appender::rolling::never(directory, file_name);

        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_filter(filter())
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter()),
        )
        .with(file_layer)
        .init();
}
