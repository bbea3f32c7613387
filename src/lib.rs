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

pub mod app;
pub mod config;
pub mod error;
pub mod games;
pub mod llm;
pub mod media;
pub mod ui;
pub mod view;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aprende", version, about = "Arithmetic mini-games and a tutor chatbot")]
pub struct Cli {
    /// Config file (defaults to ./config.json, then the user config dir)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Chat service name under `servicios` (defaults to `openai`)
    #[arg(long, short)]
    pub service: Option<String>,

    /// Disable sound effects and speech
    #[arg(long)]
    pub mute: bool,

    /// Write diagnostics to this file (tracing is off without it)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives, e.g. `info,aprende::llm=debug`
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
