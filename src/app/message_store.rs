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

use crate::view::{VisibleWindow, visible_window};
use std::collections::VecDeque;

/// Entries kept in memory; older ones are dropped first.
pub const HISTORY_CAP: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    /// Stable id, unique for the lifetime of the store. Render caches key on it.
    pub seq: u64,
    pub author: Author,
    pub text: String,
}

/// Append-only chat history holding the most recent [`HISTORY_CAP`] entries.
#[derive(Debug)]
pub struct MessageStore {
    entries: VecDeque<ChatEntry>,
    next_seq: u64,
    cap: usize,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::with_cap(HISTORY_CAP)
    }
}

impl MessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self { entries: VecDeque::new(), next_seq: 0, cap: cap.max(1) }
    }

    /// Append an entry and return its sequence id.
    pub fn append(&mut self, author: Author, text: impl Into<String>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(ChatEntry { seq, author, text: text.into() });
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
        seq
    }

    /// Drop every entry. Sequence ids keep increasing so stale cache keys
    /// never alias new entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ChatEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    /// Entries intersecting `[scroll_offset, scroll_offset + viewport_height)`,
    /// with item heights supplied by `height_of`. Indices in the result refer
    /// to [`MessageStore::get`].
    pub fn visible_window(
        &self,
        scroll_offset: u32,
        viewport_height: u32,
        height_of: impl FnMut(&ChatEntry) -> u32,
    ) -> VisibleWindow {
        self.visible_window_with_trailer(scroll_offset, viewport_height, height_of, None)
    }

    /// Like [`MessageStore::visible_window`], with one extra item of
    /// `trailer` rows after the last entry (the pending-reply bubble). That
    /// item, when visible, has index [`MessageStore::len`].
    pub fn visible_window_with_trailer(
        &self,
        scroll_offset: u32,
        viewport_height: u32,
        height_of: impl FnMut(&ChatEntry) -> u32,
        trailer: Option<u32>,
    ) -> VisibleWindow {
        let heights: Vec<u32> = self.entries.iter().map(height_of).chain(trailer).collect();
        visible_window(&heights, scroll_offset, viewport_height)
    }
}
