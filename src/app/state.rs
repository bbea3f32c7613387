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

use super::chat::ChatScreen;
use crate::config::Config;
use crate::games::memory::DEFAULT_PAIRS;
use crate::games::{MemoryGame, Quiz};
use crate::llm::ChatBackend;
use crate::media::Media;
use crate::ui::theme::Theme;
use crate::view::ScaleEngine;
use ratatui::layout::Rect;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Quiz,
    Memory,
    Chat,
}

impl Screen {
    pub const ALL: [Self; 4] = [Self::Menu, Self::Quiz, Self::Memory, Self::Chat];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Menu => "Inicio",
            Self::Quiz => "Cálculo",
            Self::Memory => "Memoria",
            Self::Chat => "Tutor",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Menu => 0,
            Self::Quiz => 1,
            Self::Memory => 2,
            Self::Chat => 3,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Activities listed on the home screen, in order.
pub const MENU_ENTRIES: [Screen; 3] = [Screen::Quiz, Screen::Memory, Screen::Chat];

pub struct MenuScreen {
    pub selected: usize,
    pub scale: ScaleEngine,
    /// Clickable entry rows from the last frame.
    pub entry_areas: Vec<(Screen, Rect)>,
}

pub struct QuizScreen {
    pub game: Quiz,
    pub scale: ScaleEngine,
    /// Clickable option boxes from the last frame.
    pub option_areas: Vec<Rect>,
}

pub struct MemoryScreen {
    pub game: MemoryGame,
    pub scale: ScaleEngine,
    /// Clickable cards from the last frame, by card index.
    pub card_areas: Vec<Rect>,
}

pub struct App {
    pub screen: Screen,
    pub menu: MenuScreen,
    pub quiz: QuizScreen,
    pub memory: MemoryScreen,
    pub chat: ChatScreen,
    pub theme: Theme,
    pub media: Media,
    pub should_quit: bool,
    /// Navigation tabs from the last frame, for mouse hit-testing.
    pub nav_areas: Vec<(Screen, Rect)>,
}

impl App {
    /// Build the app from a loaded config. `seed` drives every game's RNG.
    #[must_use]
    pub fn new(
        config: &Config,
        media: Media,
        backend: Option<Arc<dyn ChatBackend>>,
        seed: u64,
    ) -> Self {
        let (base_w, base_h) = (config.pantalla.ancho, config.pantalla.alto);
        Self {
            screen: Screen::Menu,
            menu: MenuScreen {
                selected: 0,
                scale: ScaleEngine::new(base_w, base_h),
                entry_areas: Vec::new(),
            },
            quiz: QuizScreen {
                game: Quiz::new(seed),
                scale: ScaleEngine::new(base_w, base_h),
                option_areas: Vec::new(),
            },
            memory: MemoryScreen {
                game: MemoryGame::new(seed.wrapping_add(1), DEFAULT_PAIRS),
                scale: ScaleEngine::new(base_w, base_h),
                card_areas: Vec::new(),
            },
            chat: ChatScreen::new(backend).with_base(base_w, base_h),
            theme: Theme::from_config(config),
            media,
            should_quit: false,
            nav_areas: Vec::new(),
        }
    }

    pub fn switch_to(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "switching screen");
        self.screen = screen;
        self.media.sounds.play(crate::media::SOUND_CLICK);
        if screen == Screen::Quiz {
            self.media.speech.speak(&self.quiz.game.problem().question());
        }
    }

    /// Advance per-frame animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.chat.scroll.update(dt);
        self.memory.game.tick(dt);
    }

    /// Pull finished chat replies into the history and speak them.
    pub fn poll_chat(&mut self) {
        for reply in self.chat.poll_new_messages() {
            self.media.speech.speak(&reply);
        }
    }
}
