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
use std::path::{Path, PathBuf};

/// Longest art file accepted, in lines.
const MAX_ART_LINES: usize = 40;

const PLACEHOLDER: &[&str] = &["┌─────┐", "│  ?  │", "└─────┘"];

/// Text-art images keyed by name.
#[derive(Debug)]
pub struct ImageStore {
    images: HashMap<String, Vec<String>>,
    placeholder: Vec<String>,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::load(&BTreeMap::new())
    }
}

impl ImageStore {
    #[must_use]
    pub fn load(paths: &BTreeMap<String, PathBuf>) -> Self {
        let mut images = HashMap::with_capacity(paths.len());
        for (name, path) in paths {
            match read_art(path) {
                Ok(lines) => {
                    tracing::debug!(name = %name, path = %path.display(), "image loaded");
                    images.insert(name.clone(), lines);
                }
                Err(err) => {
                    tracing::warn!(
                        name = %name,
                        path = %path.display(),
                        "image unavailable, using placeholder: {err}"
                    );
                }
            }
        }
        Self { images, placeholder: PLACEHOLDER.iter().map(|&l| l.to_owned()).collect() }
    }

    /// Art for `name`, or the placeholder frame when it failed to load.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.images.get(name).map_or(self.placeholder.as_slice(), Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }
}

fn read_art(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let lines: Vec<String> = content
        .lines()
        .take(MAX_ART_LINES)
        .map(|l| l.trim_end().replace('\t', "    "))
        .collect();
    if lines.iter().all(|l| l.is_empty()) {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "art file is empty"));
    }
    Ok(lines)
}
