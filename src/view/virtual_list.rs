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

//! Visible-window computation for variable-height lists.
//!
//! Only the items whose vertical span intersects
//! `[position, position + viewport_height)` are handed to the renderer,
//! so the per-frame drawing cost is bounded by the viewport, not the list.

/// One item that intersects the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleItem {
    pub index: usize,
    /// Row of the item's top edge relative to the viewport top. Negative
    /// when the item starts above the viewport.
    pub top: i64,
    pub height: u32,
    /// Rows cut off above the viewport.
    pub clip_top: u32,
    /// Rows actually shown.
    pub visible_rows: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    pub items: Vec<VisibleItem>,
    /// Rows of the first visible item hidden above the viewport.
    pub first_offset: u32,
    /// Sum of every item height.
    pub total_height: u64,
}

impl VisibleWindow {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn max_scroll(&self, viewport_height: u32) -> u32 {
        max_scroll(self.total_height, viewport_height)
    }
}

/// `max(0, total_height - viewport_height)`, saturated to `u32`.
#[must_use]
pub fn max_scroll(total_height: u64, viewport_height: u32) -> u32 {
    let max = total_height.saturating_sub(u64::from(viewport_height));
    u32::try_from(max).unwrap_or(u32::MAX)
}

#[must_use]
pub fn total_height(heights: &[u32]) -> u64 {
    heights.iter().map(|&h| u64::from(h)).sum()
}

/// Items of `heights` visible at scroll `position` in a viewport of
/// `viewport_height` rows.
///
/// Linear scan: accumulate heights until the running sum passes `position`
/// (first visible item and its clipped rows), then keep emitting items until
/// the viewport is filled. An item taller than the viewport is still emitted,
/// clipped. Positions past the end are clamped to the last valid scroll.
#[must_use]
pub fn visible_window(heights: &[u32], position: u32, viewport_height: u32) -> VisibleWindow {
    let total = total_height(heights);
    let position = u64::from(position.min(max_scroll(total, viewport_height)));
    let viewport_end = position + u64::from(viewport_height);
    let mut window =
        VisibleWindow { items: Vec::new(), first_offset: 0, total_height: total };
    if viewport_height == 0 {
        return window;
    }

    let mut item_top: u64 = 0;
    for (index, &height) in heights.iter().enumerate() {
        let item_bottom = item_top + u64::from(height);
        if item_top >= viewport_end {
            break;
        }
        if item_bottom > position && height > 0 {
            let clip_top = position.saturating_sub(item_top);
            let shown_bottom = item_bottom.min(viewport_end);
            let shown_top = item_top.max(position);
            if window.items.is_empty() {
                window.first_offset = u32::try_from(clip_top).unwrap_or(u32::MAX);
            }
            #[allow(clippy::cast_possible_wrap)]
            let top = item_top as i64 - position as i64;
            window.items.push(VisibleItem {
                index,
                top,
                height,
                clip_top: u32::try_from(clip_top).unwrap_or(u32::MAX),
                visible_rows: u32::try_from(shown_bottom - shown_top).unwrap_or(u32::MAX),
            });
        }
        item_top = item_bottom;
    }
    window
}
