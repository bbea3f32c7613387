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

use super::cache::LruCache;
use ratatui::layout::Rect;

/// Smallest font size (design points) any scaled text is allowed to reach.
pub const MIN_FONT_SIZE: u16 = 12;

/// Weight of the horizontal factor in the blended font factor; the vertical
/// factor gets the remainder.
const FONT_BLEND_X: f32 = 0.6;
const FONT_BLEND_Y: f32 = 0.4;

const SCALE_CACHE_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Base (design-space) and current (window-space) dimensions with the
/// factors that map one onto the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    pub base_width: u32,
    pub base_height: u32,
    pub current_width: u32,
    pub current_height: u32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ScaleState {
    #[allow(clippy::cast_precision_loss)]
    fn new(base_width: u32, base_height: u32) -> Self {
        let base_width = base_width.max(1);
        let base_height = base_height.max(1);
        Self {
            base_width,
            base_height,
            current_width: base_width,
            current_height: base_height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Maps design-space coordinates and font sizes to window-space.
///
/// Scaled values are memoized; the memo is keyed implicitly by the current
/// scale generation and cleared whenever [`ScaleEngine::update`] observes a
/// real change.
#[derive(Debug)]
pub struct ScaleEngine {
    state: ScaleState,
    origin: (u16, u16),
    generation: u64,
    cache: LruCache<(Axis, u32), i32>,
}

impl ScaleEngine {
    #[must_use]
    pub fn new(base_width: u32, base_height: u32) -> Self {
        Self {
            state: ScaleState::new(base_width, base_height),
            origin: (0, 0),
            generation: 0,
            cache: LruCache::new(SCALE_CACHE_CAPACITY),
        }
    }

    #[must_use]
    pub fn state(&self) -> ScaleState {
        self.state
    }

    /// Bumped on every effective resize. Callers keying their own caches on
    /// scaled geometry can compare against it.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn scale_x(&self) -> f32 {
        self.state.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f32 {
        self.state.scale_y
    }

    /// Recompute the factors for a window of `width` × `height`.
    ///
    /// Non-positive dimensions are treated as 1. Returns `false` (and leaves
    /// the memo untouched) when the dimensions did not change.
    #[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn update(&mut self, width: i32, height: i32) -> bool {
        let width = width.max(1) as u32;
        let height = height.max(1) as u32;
        if width == self.state.current_width && height == self.state.current_height {
            return false;
        }

        self.state.current_width = width;
        self.state.current_height = height;
        self.state.scale_x = width as f32 / self.state.base_width as f32;
        self.state.scale_y = height as f32 / self.state.base_height as f32;
        self.generation += 1;
        self.cache.clear();
        tracing::debug!(
            width,
            height,
            scale_x = self.state.scale_x,
            scale_y = self.state.scale_y,
            generation = self.generation,
            "scale factors updated"
        );
        true
    }

    /// Same as [`ScaleEngine::update`] but also remembers the area's origin,
    /// which [`ScaleEngine::centered_rect`] offsets its result by.
    pub fn update_area(&mut self, area: Rect) -> bool {
        self.origin = (area.x, area.y);
        self.update(i32::from(area.width), i32::from(area.height))
    }

    /// `round(v * scale_x)`.
    pub fn scale_value(&mut self, v: f32) -> i32 {
        self.scale_along(Axis::X, v)
    }

    /// `round(v * scale_y)`.
    pub fn scale_value_y(&mut self, v: f32) -> i32 {
        self.scale_along(Axis::Y, v)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn scale_along(&mut self, axis: Axis, v: f32) -> i32 {
        let factor = match axis {
            Axis::X => self.state.scale_x,
            Axis::Y => self.state.scale_y,
        };
        self.cache.get_or_insert_with((axis, v.to_bits()), || (v * factor).round() as i32)
    }

    /// Scaled horizontal length in cells, never negative.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn cells_x(&mut self, v: f32) -> u16 {
        self.scale_value(v).clamp(0, i32::from(u16::MAX)) as u16
    }

    /// Scaled vertical length in cells, never negative.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn cells_y(&mut self, v: f32) -> u16 {
        self.scale_value_y(v).clamp(0, i32::from(u16::MAX)) as u16
    }

    /// Font size for the current window, blending both axes and never going
    /// below [`MIN_FONT_SIZE`].
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn scale_font(&self, size: f32) -> u16 {
        let factor = self.state.scale_x * FONT_BLEND_X + self.state.scale_y * FONT_BLEND_Y;
        let scaled = (size * factor).round().clamp(0.0, f32::from(u16::MAX)) as u16;
        scaled.max(MIN_FONT_SIZE)
    }

    /// A `width` × `height` (design-space) rectangle centered in the current
    /// viewport, nudged by the scaled offsets and clamped inside it.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn centered_rect(&mut self, width: f32, height: f32, offset_x: f32, offset_y: f32) -> Rect {
        let view_w = i64::from(self.state.current_width);
        let view_h = i64::from(self.state.current_height);
        let w = i64::from(self.scale_value(width).max(1)).min(view_w);
        let h = i64::from(self.scale_value_y(height).max(1)).min(view_h);
        let dx = i64::from(self.scale_value(offset_x));
        let dy = i64::from(self.scale_value_y(offset_y));
        let x = ((view_w - w) / 2 + dx).clamp(0, view_w - w);
        let y = ((view_h - h) / 2 + dy).clamp(0, view_h - h);
        Rect {
            x: self.origin.0.saturating_add(x as u16),
            y: self.origin.1.saturating_add(y as u16),
            width: w as u16,
            height: h as u16,
        }
    }
}
