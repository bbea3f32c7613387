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

//! Chat-completion client for the tutor bot.

pub mod client;
pub mod wire;

pub use client::ChatClient;

use futures::future::BoxFuture;

/// Shown instead of calling the API when the child sends nothing.
pub const EMPTY_MESSAGE_REPLY: &str = "No puedo procesar un mensaje vacío.";
/// Shown whenever the API call fails for any reason.
pub const API_ERROR_REPLY: &str = "Ocurrió un error al procesar la respuesta de la API.";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("empty message")]
    EmptyInput,
    #[error("no chat service configured{}", .0.as_ref().map(|n| format!(" named `{n}`")).unwrap_or_default())]
    MissingService(Option<String>),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode chat response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("chat response contained no text")]
    EmptyReply,
}

impl ChatError {
    /// The fixed, child-friendly text shown in the chat for this failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => EMPTY_MESSAGE_REPLY,
            _ => API_ERROR_REPLY,
        }
    }
}

/// Reject blank prompts before any I/O happens.
pub fn validate_prompt(text: &str) -> Result<&str, ChatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() { Err(ChatError::EmptyInput) } else { Ok(trimmed) }
}

/// Anything able to answer a single user prompt.
pub trait ChatBackend: Send + Sync {
    fn reply<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ChatError>>;
}
