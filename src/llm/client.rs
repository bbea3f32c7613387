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

use super::wire::{ChatCompletion, ChatCompletionRequest, StreamAccumulator, WireMessage};
use super::{ChatBackend, ChatError, validate_prompt};
use crate::config::{Config, ConnectionConfig};
use futures::StreamExt as _;
use futures::future::BoxFuture;

/// Longest error body kept for logging.
const ERROR_BODY_LIMIT: usize = 512;

/// Single-shot client: each call sends the system prompt plus one user
/// message and returns the assistant's reply. No retries; the HTTP
/// client's default timeouts apply.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    service: String,
    api_key: String,
    model: String,
    system_prompt: String,
    connection: ConnectionConfig,
}

impl ChatClient {
    pub fn from_config(config: &Config, service: Option<&str>) -> Result<Self, ChatError> {
        let (name, settings) = config
            .service(service)
            .ok_or_else(|| ChatError::MissingService(service.map(ToOwned::to_owned)))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("aprende/", env!("CARGO_PKG_VERSION")))
            .build()?;
        tracing::info!(service = name, model = settings.model(), url = %config.conexion.url, "chat client ready");
        Ok(Self {
            http,
            service: name.to_owned(),
            api_key: settings.api_key.clone(),
            model: settings.model().to_owned(),
            system_prompt: config.system_prompt().to_owned(),
            connection: config.conexion.clone(),
        })
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn request_body<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![WireMessage::system(&self.system_prompt), WireMessage::user(prompt)],
            temperature: self.connection.temperature,
            top_p: self.connection.top_p,
            max_tokens: self.connection.max_tokens,
            stream: self.connection.stream,
        }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let prompt = validate_prompt(prompt)?;
        let body = self.request_body(prompt);
        tracing::debug!(
            model = %self.model,
            stream = self.connection.stream,
            chars = prompt.chars().count(),
            "sending chat request"
        );

        let mut request = self.http.post(&self.connection.url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_at_char_boundary(&mut body, ERROR_BODY_LIMIT);
            return Err(ChatError::Status { status: status.as_u16(), body });
        }

        let text = if self.connection.stream {
            let mut accumulator = StreamAccumulator::new();
            let mut chunks = response.bytes_stream();
            while let Some(chunk) = chunks.next().await {
                accumulator.feed(&chunk?)?;
                if accumulator.is_done() {
                    break;
                }
            }
            accumulator.finish()?
        } else {
            let completion: ChatCompletion = serde_json::from_slice(&response.bytes().await?)?;
            completion.message_text().unwrap_or_default().to_owned()
        };

        let text = text.trim().to_owned();
        if text.is_empty() {
            return Err(ChatError::EmptyReply);
        }
        tracing::debug!(chars = text.chars().count(), "chat reply received");
        Ok(text)
    }
}

impl ChatBackend for ChatClient {
    fn reply<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ChatError>> {
        Box::pin(self.complete(prompt))
    }
}

fn truncate_at_char_boundary(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut cut = limit;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
