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

//! OpenAI-compatible chat-completion wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> WireMessage<'a> {
    #[must_use]
    pub fn system(content: &'a str) -> Self {
        Self { role: "system", content }
    }

    #[must_use]
    pub fn user(content: &'a str) -> Self {
        Self { role: "user", content }
    }
}

/// Non-streamed completion body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ChoiceContent>,
    #[serde(default)]
    pub delta: Option<ChoiceContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceContent {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Text of the first choice's message.
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.choices.first()?.message.as_ref()?.content.as_deref()
    }

    /// Concatenated delta text of a streamed chunk.
    #[must_use]
    pub fn delta_text(&self) -> String {
        self.choices
            .iter()
            .filter_map(|c| c.delta.as_ref().and_then(|d| d.content.as_deref()))
            .collect()
    }
}

/// One decoded line of a server-sent-event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine<'a> {
    Data(&'a str),
    Done,
    Ignore,
}

#[must_use]
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    let line = line.trim_end_matches('\r');
    let Some(payload) = line.strip_prefix("data:") else {
        return SseLine::Ignore;
    };
    let payload = payload.trim_start();
    if payload == "[DONE]" {
        SseLine::Done
    } else if payload.is_empty() {
        SseLine::Ignore
    } else {
        SseLine::Data(payload)
    }
}

/// Incremental SSE decoder: feed raw body chunks, collect delta text.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    pending: Vec<u8>,
    text: String,
    done: bool,
}

impl StreamAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one body chunk. Complete lines are decoded; a trailing partial
    /// line is kept for the next chunk.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), serde_json::Error> {
        self.pending.extend_from_slice(chunk);
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            self.decode_line(&line)?;
        }
        Ok(())
    }

    /// Flush whatever is left once the body has ended.
    pub fn finish(mut self) -> Result<String, serde_json::Error> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.decode_line(&rest)?;
        }
        Ok(self.text)
    }

    fn decode_line(&mut self, raw: &[u8]) -> Result<(), serde_json::Error> {
        if self.done {
            return Ok(());
        }
        let line = String::from_utf8_lossy(raw);
        match parse_sse_line(line.trim_end_matches('\n')) {
            SseLine::Data(payload) => {
                let chunk: ChatCompletion = serde_json::from_str(payload)?;
                self.text.push_str(&chunk.delta_text());
            }
            SseLine::Done => self.done = true,
            SseLine::Ignore => {}
        }
        Ok(())
    }
}
