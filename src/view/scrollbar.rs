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

use super::scroll::DragTrack;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Shortest thumb, in rows.
pub const MIN_THUMB: u16 = 1;

const TRACK_SYMBOL: &str = "│";
const THUMB_SYMBOL: &str = "█";

/// Thumb placement inside a vertical track (absolute rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbGeometry {
    pub top: u16,
    pub height: u16,
}

impl ThumbGeometry {
    #[must_use]
    pub fn contains_row(&self, row: u16) -> bool {
        row >= self.top && row < self.top.saturating_add(self.height)
    }
}

/// Where the thumb sits for the given content/viewport/position, or `None`
/// when everything fits and no scrollbar is needed.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn thumb_geometry(
    track: Rect,
    total_height: u64,
    viewport_height: u32,
    position: f32,
) -> Option<ThumbGeometry> {
    if total_height <= u64::from(viewport_height) || track.height == 0 || track.width == 0 {
        return None;
    }

    let track_h = f64::from(track.height);
    let ratio = f64::from(viewport_height) / total_height as f64;
    let height = ((track_h * ratio) as u16).clamp(MIN_THUMB.min(track.height), track.height);

    let max_scroll = (total_height - u64::from(viewport_height)) as f64;
    let travel = f64::from(track.height - height);
    let position = f64::from(position).clamp(0.0, max_scroll);
    let offset = (position * travel / max_scroll).round() as u16;

    Some(ThumbGeometry { top: track.y + offset.min(track.height - height), height })
}

/// Result of pressing the mouse inside the scrollbar column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollbarHit {
    /// Press on the thumb: start a drag anchored at the thumb's top.
    Thumb { thumb_top: f32 },
    /// Press on the track: scroll so the thumb centers under the cursor.
    Track { target: f32 },
    Outside,
}

#[must_use]
pub fn drag_track(track: Rect, thumb: ThumbGeometry) -> DragTrack {
    DragTrack {
        top: f32::from(track.y),
        height: f32::from(track.height),
        thumb_height: f32::from(thumb.height),
    }
}

#[must_use]
pub fn hit_test(
    track: Rect,
    thumb: Option<ThumbGeometry>,
    max_scroll: u32,
    column: u16,
    row: u16,
) -> ScrollbarHit {
    let Some(thumb) = thumb else {
        return ScrollbarHit::Outside;
    };
    let inside = column >= track.x
        && column < track.right()
        && row >= track.y
        && row < track.bottom();
    if !inside {
        return ScrollbarHit::Outside;
    }
    if thumb.contains_row(row) {
        return ScrollbarHit::Thumb { thumb_top: f32::from(thumb.top) };
    }
    let centered_top = f32::from(row) - f32::from(thumb.height) / 2.0;
    let target = drag_track(track, thumb).scroll_for_thumb_top(centered_top, max_scroll);
    ScrollbarHit::Track { target }
}

/// Vertical scrollbar: a dim track line with a solid thumb.
pub struct Scrollbar {
    thumb: Option<ThumbGeometry>,
    track_style: Style,
    thumb_style: Style,
}

impl Scrollbar {
    #[must_use]
    pub fn new(thumb: Option<ThumbGeometry>) -> Self {
        Self { thumb, track_style: Style::default(), thumb_style: Style::default() }
    }

    #[must_use]
    pub fn track_style(mut self, style: Style) -> Self {
        self.track_style = style;
        self
    }

    #[must_use]
    pub fn thumb_style(mut self, style: Style) -> Self {
        self.thumb_style = style;
        self
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(thumb) = self.thumb else {
            return;
        };
        if area.width == 0 {
            return;
        }
        for y in area.top()..area.bottom() {
            if let Some(cell) = buf.cell_mut((area.x, y)) {
                if thumb.contains_row(y) {
                    cell.set_symbol(THUMB_SYMBOL).set_style(self.thumb_style);
                } else {
                    cell.set_symbol(TRACK_SYMBOL).set_style(self.track_style);
                }
            }
        }
    }
}
