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

use super::input::InputState;
use super::message_store::{Author, MessageStore};
use crate::config::{DEFAULT_BASE_HEIGHT, DEFAULT_BASE_WIDTH};
use crate::llm::{API_ERROR_REPLY, ChatBackend, ChatError, validate_prompt};
use crate::view::{LruCache, ScaleEngine, ScrollController, ThumbGeometry};
use ratatui::layout::Rect;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Wrapped bubbles kept across frames, keyed by (entry seq, wrap width).
const BUBBLE_CACHE_CAP: usize = 512;

/// Reply delivered by a background chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Reply(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request is still in flight; nothing was sent.
    Busy,
    /// Blank input answered locally with the fixed fallback text.
    Rejected,
    /// No backend configured; answered locally with the API error text.
    Unavailable,
    Sent,
}

/// State of the tutor chat screen.
///
/// Requests run on the tokio runtime; each one sends exactly one
/// [`ChatEvent`] back through the channel, which the render loop drains with
/// [`ChatScreen::poll_new_messages`]. The history is only ever touched from
/// the render loop.
pub struct ChatScreen {
    pub store: MessageStore,
    pub input: InputState,
    pub scroll: ScrollController,
    pub scale: ScaleEngine,
    pub(crate) bubbles: LruCache<(u64, u16), Arc<[String]>>,
    /// Keep the view pinned to the newest message.
    pub follow_end: bool,
    /// Message viewport from the last frame.
    pub viewport: Rect,
    /// Scrollbar track and thumb from the last frame, for mouse hit-testing.
    pub track: Rect,
    pub thumb: Option<ThumbGeometry>,
    waiting: bool,
    backend: Option<Arc<dyn ChatBackend>>,
    event_tx: mpsc::UnboundedSender<ChatEvent>,
    event_rx: mpsc::UnboundedReceiver<ChatEvent>,
}

impl ChatScreen {
    #[must_use]
    pub fn new(backend: Option<Arc<dyn ChatBackend>>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            store: MessageStore::new(),
            input: InputState::new(),
            scroll: ScrollController::new(),
            scale: ScaleEngine::new(DEFAULT_BASE_WIDTH, DEFAULT_BASE_HEIGHT),
            bubbles: LruCache::new(BUBBLE_CACHE_CAP),
            follow_end: true,
            viewport: Rect::default(),
            track: Rect::default(),
            thumb: None,
            waiting: false,
            backend,
            event_tx,
            event_rx,
        }
    }

    #[must_use]
    pub fn with_base(mut self, base_width: u32, base_height: u32) -> Self {
        self.scale = ScaleEngine::new(base_width, base_height);
        self
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Send the current input. Must run inside a tokio runtime when a
    /// backend is configured and the input is not blank.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.waiting {
            return SubmitOutcome::Busy;
        }
        let text = self.input.take();
        let prompt = match validate_prompt(&text) {
            Ok(prompt) => prompt.to_owned(),
            Err(err) => {
                self.push(Author::Bot, err.user_message());
                return SubmitOutcome::Rejected;
            }
        };
        self.push(Author::User, prompt.clone());

        let Some(backend) = self.backend.as_ref().map(Arc::clone) else {
            tracing::warn!("chat message sent without a configured service");
            self.push(Author::Bot, API_ERROR_REPLY);
            return SubmitOutcome::Unavailable;
        };

        self.waiting = true;
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let reply = match backend.reply(&prompt).await {
                Ok(text) => text,
                Err(err) => {
                    log_chat_error(&err);
                    err.user_message().to_owned()
                }
            };
            if tx.send(ChatEvent::Reply(reply)).is_err() {
                tracing::debug!("chat screen dropped before reply arrived");
            }
        });
        SubmitOutcome::Sent
    }

    /// Await the next chat event. Pending forever when no request is in
    /// flight, so it can sit in a `select!`.
    pub async fn next_event(&mut self) -> Option<ChatEvent> {
        self.event_rx.recv().await
    }

    /// Apply one event; returns the reply text to speak.
    pub fn receive(&mut self, event: ChatEvent) -> String {
        let ChatEvent::Reply(text) = event;
        self.waiting = false;
        self.push(Author::Bot, text.clone());
        text
    }

    /// Drain every reply that arrived since the last call, without blocking.
    pub fn poll_new_messages(&mut self) -> Vec<String> {
        let mut replies = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            replies.push(self.receive(event));
        }
        replies
    }

    /// `Ctrl+L`: forget the conversation. An in-flight reply still lands.
    pub fn clear_history(&mut self) {
        self.store.clear();
        self.bubbles.clear();
        self.scroll.reset();
        self.scroll.set_max_scroll(0);
        self.follow_end = true;
    }

    pub fn scroll_by(&mut self, rows: f32) {
        if self.scroll.is_dragging() {
            return;
        }
        self.scroll.scroll_by(rows);
        self.follow_end = self.scroll.targets_end();
    }

    pub fn scroll_to(&mut self, position: f32) {
        self.scroll.scroll_to(position);
        self.follow_end = self.scroll.targets_end();
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll.scroll_to_end();
        self.follow_end = true;
    }

    #[must_use]
    pub fn page_rows(&self) -> f32 {
        f32::from(self.viewport.height.saturating_sub(1).max(1))
    }

    fn push(&mut self, author: Author, text: impl Into<String>) {
        self.store.append(author, text);
        if self.follow_end {
            self.scroll.scroll_to_end();
        }
    }
}

fn log_chat_error(err: &ChatError) {
    match err {
        ChatError::EmptyInput => tracing::debug!("blank prompt reached the backend"),
        _ => tracing::error!(error = %err, "chat request failed"),
    }
}
