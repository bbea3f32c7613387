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

//! JSON configuration, read once at startup.
//!
//! Every section is optional and falls back to defaults; only a missing or
//! unparsable file is fatal.

use crate::error::AppError;
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const CONFIG_DIR_NAME: &str = "aprende";

pub const DEFAULT_BASE_WIDTH: u32 = 100;
pub const DEFAULT_BASE_HEIGHT: u32 = 30;
pub const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "Eres un tutor amable de matemáticas para niños. \
Responde con frases cortas y sencillas, en español.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pantalla: ScreenConfig,
    pub colores: BTreeMap<String, ColorValue>,
    pub imagenes: BTreeMap<String, PathBuf>,
    pub sonidos: BTreeMap<String, PathBuf>,
    pub conexion: ConnectionConfig,
    pub servicios: BTreeMap<String, ServiceConfig>,
    pub prompt_inicial: Option<String>,
}

/// Design-space dimensions every layout constant is authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub ancho: u32,
    pub alto: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { ancho: DEFAULT_BASE_WIDTH, alto: DEFAULT_BASE_HEIGHT }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub url: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CHAT_URL.to_owned(),
            temperature: 0.7,
            top_p: 1.0,
            max_tokens: 256,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_key: String,
    pub model: Option<String>,
}

impl ServiceConfig {
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().filter(|m| !m.trim().is_empty()).unwrap_or(DEFAULT_MODEL)
    }
}

/// A color written either as `"#rrggbb"` or as `[r, g, b]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(String),
    Rgb([u8; 3]),
}

impl ColorValue {
    #[must_use]
    pub fn to_color(&self) -> Option<Color> {
        match self {
            Self::Rgb([r, g, b]) => Some(Color::Rgb(*r, *g, *b)),
            Self::Hex(raw) => parse_hex_color(raw),
        }
    }
}

fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Config {
    /// Pick the chat service: the requested name, else `openai`, else the
    /// first configured one.
    #[must_use]
    pub fn service(&self, requested: Option<&str>) -> Option<(&str, &ServiceConfig)> {
        if let Some(name) = requested {
            return self.servicios.get_key_value(name).map(|(k, v)| (k.as_str(), v));
        }
        self.servicios
            .get_key_value("openai")
            .or_else(|| self.servicios.iter().next())
            .map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        self.prompt_inicial
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    #[must_use]
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colores.get(name).and_then(ColorValue::to_color)
    }
}

/// Resolve the config path: an explicit path wins; otherwise `config.json`
/// in the working directory, then `<config_dir>/aprende/config.json`.
#[must_use]
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(DEFAULT_CONFIG_FILE))
        .filter(|p| p.is_file())
        .unwrap_or(local)
}

pub fn load(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        tracing::error!("failed to read config {}: {err}", path.display());
        AppError::ConfigNotFound(path.to_path_buf())
    })?;
    let config = parse(&content)?;
    tracing::info!(
        path = %path.display(),
        base_width = config.pantalla.ancho,
        base_height = config.pantalla.alto,
        services = config.servicios.len(),
        "config loaded"
    );
    Ok(config)
}

pub fn parse(content: &str) -> Result<Config, AppError> {
    serde_json::from_str(content).map_err(|err| AppError::ConfigInvalid(err.to_string()))
}
