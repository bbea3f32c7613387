// Aprende - arithmetic mini-games and a tutor chatbot for the terminal
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


use aprende::Cli;
use aprende::error::AppError;
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[allow(clippy::exit)]
fn main() {
    let Err(err) = run() else {
        return;
    };
    match err.chain().find_map(|cause| cause.downcast_ref::<AppError>()) {
        Some(app_error) => {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        None => {
            eprintln!("aprende: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config_path = aprende::config::resolve_path(cli.config.as_deref());
    let config = aprende::config::load(&config_path)?;
    tracing::info!(
        path = %config_path.display(),
        services = config.servicios.len(),
        stream = config.conexion.stream,
        "config loaded"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut app = aprende::app::create_app(&config, &cli);
        aprende::app::run_tui(&mut app).await
    })
}

/// Diagnostics go to `--log-file` only; the terminal belongs to the UI.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_deref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!("aprende: RUST_LOG ignored, pass --log-file <PATH> to write diagnostics");
        }
        return Ok(());
    };

    let (filter, directives) = log_filter(cli.log_filter.as_deref())?;
    let file = open_log_file(path, cli.log_append)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        filter = %directives,
        append = cli.log_append,
        "logging to file"
    );
    Ok(())
}

/// `--log-filter` wins over `RUST_LOG`, which wins over the default.
fn log_filter(explicit: Option<&str>) -> anyhow::Result<(EnvFilter, String)> {
    let directives = match explicit {
        Some(directives) => directives.to_owned(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned()),
    };
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("bad log filter `{directives}`: {e}"))?;
    Ok((filter, directives))
}

fn open_log_file(path: &Path, append: bool) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file {}: {e}", path.display()))
}
