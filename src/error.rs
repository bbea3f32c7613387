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

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Config file is not valid JSON: {0}")]
    ConfigInvalid(String),
    #[error("Terminal could not be initialized")]
    TerminalUnavailable,
}

impl AppError {
    pub const CONFIG_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const CONFIG_INVALID_EXIT_CODE: i32 = 21;
    pub const TERMINAL_UNAVAILABLE_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound(_) => Self::CONFIG_NOT_FOUND_EXIT_CODE,
            Self::ConfigInvalid(_) => Self::CONFIG_INVALID_EXIT_CODE,
            Self::TerminalUnavailable => Self::TERMINAL_UNAVAILABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigNotFound(path) => format!(
                "Config file not found at {}. Create it or pass --config <PATH>.",
                path.display()
            ),
            Self::ConfigInvalid(detail) => format!("Config file could not be parsed: {detail}"),
            Self::TerminalUnavailable => {
                "This program needs an interactive terminal to draw its screens.".to_owned()
            }
        }
    }
}
