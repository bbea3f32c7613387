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

//! Images, sound effects and speech.
//!
//! Every asset failure is logged and replaced with a placeholder (images) or
//! silence (audio); nothing here can stop the application.

pub mod audio;
pub mod images;

pub use audio::{SoundBoard, Speech};
pub use images::ImageStore;

use crate::config::Config;

pub const SOUND_CORRECT: &str = "correcto";
pub const SOUND_WRONG: &str = "incorrecto";
pub const SOUND_MATCH: &str = "pareja";
pub const SOUND_WIN: &str = "victoria";
pub const SOUND_CLICK: &str = "click";

pub struct Media {
    pub images: ImageStore,
    pub sounds: SoundBoard,
    pub speech: Speech,
}

impl Media {
    #[must_use]
    pub fn load(config: &Config, muted: bool) -> Self {
        let images = ImageStore::load(&config.imagenes);
        if muted {
            tracing::info!("sound and speech muted");
            return Self { images, sounds: SoundBoard::silent(), speech: Speech::silent() };
        }
        Self {
            images,
            sounds: SoundBoard::load(&config.sonidos),
            speech: Speech::detect(),
        }
    }

    /// No images, no sound, no speech.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            images: ImageStore::default(),
            sounds: SoundBoard::silent(),
            speech: Speech::silent(),
        }
    }
}
