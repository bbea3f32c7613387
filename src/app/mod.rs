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

pub mod chat;
mod events;
mod input;
mod message_store;
mod state;

pub use chat::{ChatEvent, ChatScreen, SubmitOutcome};
pub use events::handle_terminal_event;
pub use input::InputState;
pub use message_store::{Author, ChatEntry, HISTORY_CAP, MessageStore};
pub use state::{App, MENU_ENTRIES, MemoryScreen, MenuScreen, QuizScreen, Screen};

use crate::Cli;
use crate::config::Config;
use crate::error::AppError;
use crate::llm::{ChatBackend, ChatClient};
use crate::media::Media;
use crate::view::scroll::MAX_FRAME_DT;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Build the app: media, palette and the chat backend for the selected
/// service. A missing or unusable service leaves the chat answering with the
/// API error text instead of failing startup.
pub fn create_app(config: &Config, cli: &Cli) -> App {
    let media = Media::load(config, cli.mute);
    let backend: Option<Arc<dyn ChatBackend>> =
        match ChatClient::from_config(config, cli.service.as_deref()) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "chat disabled");
                None
            }
        };
    App::new(config, media, backend, rand::random())
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init().map_err(|e| {
        tracing::error!("failed to initialize terminal: {e}");
        AppError::TerminalUnavailable
    })?;

    // Enable bracketed paste and mouse capture (ignore error on unsupported terminals)
    if let Err(e) = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
    ) {
        tracing::warn!("mouse capture unavailable: {e}");
    }

    let result = event_loop(&mut terminal, app).await;

    // Restore terminal
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
    );
    ratatui::restore();

    result
}

async fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.chat.next_event() => {
                let reply = app.chat.receive(event);
                app.media.speech.speak(&reply);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        while let Some(Some(Ok(event))) = events.next().now_or_never() {
            events::handle_terminal_event(app, event);
        }
        app.poll_chat();

        if app.should_quit {
            break;
        }

        // Phase 3: advance animations, then render once
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32().min(MAX_FRAME_DT);
        last_tick = now;
        app.tick(dt);
        terminal.draw(|f| crate::ui::render(f, app))?;
        last_render = Instant::now();
    }

    Ok(())
}
