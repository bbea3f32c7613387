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

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};

/// Audio players tried in order.
const SOUND_PLAYERS: &[&str] = &["paplay", "aplay", "afplay"];
/// Speech synthesizers tried in order.
const SPEECH_PROGRAMS: &[&str] = &["espeak-ng", "espeak", "say"];
/// Longest text handed to the synthesizer.
const MAX_SPOKEN_CHARS: usize = 400;

/// Sound effects keyed by name, played by an external player.
#[derive(Debug, Default)]
pub struct SoundBoard {
    player: Option<PathBuf>,
    sounds: HashMap<String, PathBuf>,
}

impl SoundBoard {
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn load(paths: &BTreeMap<String, PathBuf>) -> Self {
        let player = first_available(SOUND_PLAYERS);
        if player.is_none() && !paths.is_empty() {
            tracing::warn!("no audio player found ({}); sounds disabled", SOUND_PLAYERS.join(", "));
        }
        let mut sounds = HashMap::with_capacity(paths.len());
        for (name, path) in paths {
            if path.is_file() {
                sounds.insert(name.clone(), path.clone());
            } else {
                tracing::warn!(name = %name, path = %path.display(), "sound file missing, using silence");
            }
        }
        Self { player, sounds }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.player.is_some()
    }

    /// Fire-and-forget playback; unknown names are silent.
    pub fn play(&self, name: &str) {
        let (Some(player), Some(path)) = (&self.player, self.sounds.get(name)) else {
            return;
        };
        if let Some(child) = spawn_player(player, &[path.as_os_str()]) {
            reap(child);
        }
    }
}

/// Text-to-speech through a system synthesizer. One utterance at a time:
/// speaking again cuts off whatever is still being said.
#[derive(Debug, Default)]
pub struct Speech {
    program: Option<PathBuf>,
    current: Option<Child>,
}

impl Speech {
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn detect() -> Self {
        let program = first_available(SPEECH_PROGRAMS);
        match &program {
            Some(path) => tracing::info!(program = %path.display(), "speech enabled"),
            None => tracing::info!("no speech synthesizer found; speech disabled"),
        }
        Self { program, current: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.program.is_some()
    }

    pub fn speak(&mut self, text: &str) {
        let Some(program) = self.program.clone() else {
            return;
        };
        let text = spoken_text(text);
        if text.is_empty() {
            return;
        }
        let mut args: Vec<&OsStr> = Vec::new();
        if is_espeak(&program) {
            args.extend([OsStr::new("-v"), OsStr::new("es")]);
        }
        args.push(OsStr::new(text.as_str()));
        self.stop();
        self.current = spawn_player(&program, &args);
    }

    /// Cut off the utterance in progress, if any.
    pub fn stop(&mut self) {
        let Some(mut child) = self.current.take() else {
            return;
        };
        if matches!(child.try_wait(), Ok(None))
            && let Err(err) = child.start_kill()
        {
            tracing::debug!("failed to stop speech: {err}");
        }
        reap(child);
    }
}

fn is_espeak(program: &Path) -> bool {
    program.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with("espeak"))
}

/// Collapse whitespace and cut to [`MAX_SPOKEN_CHARS`].
fn spoken_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").chars().take(MAX_SPOKEN_CHARS).collect()
}

fn first_available(programs: &[&str]) -> Option<PathBuf> {
    programs.iter().find_map(|name| which::which(name).ok())
}

/// Spawn with all stdio detached; the terminal belongs to the UI. Needs the
/// tokio runtime, which owns process reaping.
fn spawn_player(program: &Path, args: &[&OsStr]) -> Option<Child> {
    if tokio::runtime::Handle::try_current().is_err() {
        tracing::debug!(program = %program.display(), "no runtime, media program skipped");
        return None;
    }
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();
    match child {
        Ok(child) => Some(child),
        Err(err) => {
            tracing::warn!(program = %program.display(), "failed to start media program: {err}");
            None
        }
    }
}

/// Wait for `child` in the background so it never lingers as a zombie.
fn reap(mut child: Child) {
    tokio::spawn(async move {
        if let Err(err) = child.wait().await {
            tracing::debug!("media child wait failed: {err}");
        }
    });
}
