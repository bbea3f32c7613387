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

use crate::config::Config;
use ratatui::style::Color;

// Accent
pub const ACCENT: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "❯";
pub const SEPARATOR_CHAR: &str = "─";

// Chat bubbles
pub const USER_BUBBLE_BG: Color = Color::Rgb(40, 44, 52);
pub const BOT_BUBBLE_BG: Color = Color::Rgb(28, 48, 40);

// Game feedback
pub const CORRECT: Color = Color::Green;
pub const WRONG: Color = Color::Red;
pub const CARD_BACK: Color = Color::Rgb(60, 70, 110);
pub const CARD_FACE: Color = Color::Rgb(230, 230, 210);

/// Runtime palette. Each slot can be overridden under `colores` in the config
/// with the key shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// `acento`
    pub accent: Color,
    /// `texto`
    pub text: Color,
    /// `tenue`
    pub dim: Color,
    /// `burbuja_usuario`
    pub user_bubble: Color,
    /// `burbuja_bot`
    pub bot_bubble: Color,
    /// `correcto`
    pub correct: Color,
    /// `incorrecto`
    pub wrong: Color,
    /// `tarjeta`
    pub card_back: Color,
    /// `tarjeta_abierta`
    pub card_face: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: ACCENT,
            text: Color::White,
            dim: DIM,
            user_bubble: USER_BUBBLE_BG,
            bot_bubble: BOT_BUBBLE_BG,
            correct: CORRECT,
            wrong: WRONG,
            card_back: CARD_BACK,
            card_face: CARD_FACE,
        }
    }
}

impl Theme {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let base = Self::default();
        let pick = |key: &str, fallback: Color| config.color(key).unwrap_or(fallback);
        Self {
            accent: pick("acento", base.accent),
            text: pick("texto", base.text),
            dim: pick("tenue", base.dim),
            user_bubble: pick("burbuja_usuario", base.user_bubble),
            bot_bubble: pick("burbuja_bot", base.bot_bubble),
            correct: pick("correcto", base.correct),
            wrong: pick("incorrecto", base.wrong),
            card_back: pick("tarjeta", base.card_back),
            card_face: pick("tarjeta_abierta", base.card_face),
        }
    }
}
