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

/// Distance (rows) under which an animation snaps onto its target.
pub const SETTLE_EPSILON: f32 = 0.5;
/// Per-second rate at which the position closes the gap to the target.
const FOLLOW_RATE: f32 = 10.0;
/// Longest frame step the render loop feeds into [`ScrollController::update`].
pub const MAX_FRAME_DT: f32 = 0.1;
/// Residual velocity below which inertia stops.
const INERTIA_THRESHOLD: f32 = 0.1;
/// Per-frame exponential damping of residual velocity.
const INERTIA_DAMPING: f32 = 0.92;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Animating,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub position: f32,
    pub target: f32,
    pub velocity: f32,
    pub max_scroll: u32,
    pub dragging: bool,
}

/// Scrollbar track measurements used to turn a thumb drag into a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTrack {
    pub top: f32,
    pub height: f32,
    pub thumb_height: f32,
}

impl DragTrack {
    /// Scroll value for a thumb whose top edge sits at `thumb_top`.
    #[must_use]
    pub fn scroll_for_thumb_top(&self, thumb_top: f32, max_scroll: u32) -> f32 {
        let travel = self.height - self.thumb_height;
        if travel <= 0.0 {
            return 0.0;
        }
        let clamped = thumb_top.clamp(self.top, self.top + travel);
        #[allow(clippy::cast_precision_loss)]
        let max = max_scroll as f32;
        (clamped - self.top) * max / travel
    }
}

/// Smoothed, inertial scroll offset.
///
/// Inputs (`scroll_by`, `scroll_to`, drags) only move the target; the
/// position moves exclusively inside [`ScrollController::update`], so every
/// frame renders one coherent offset no matter how many inputs arrived.
#[derive(Debug, Clone)]
pub struct ScrollController {
    state: ScrollState,
    phase: ScrollPhase,
    /// Distance between the cursor and the thumb top when the drag began.
    grab_offset: f32,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ScrollState {
                position: 0.0,
                target: 0.0,
                velocity: 0.0,
                max_scroll: 0,
                dragging: false,
            },
            phase: ScrollPhase::Idle,
            grab_offset: 0.0,
        }
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    #[must_use]
    pub fn position(&self) -> f32 {
        self.state.position
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.state.target
    }

    #[must_use]
    pub fn max_scroll(&self) -> u32 {
        self.state.max_scroll
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Rounded position, in whole rows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offset(&self) -> u32 {
        self.state.position.round().max(0.0) as u32
    }

    /// Whether the target rests at (or past) the bottom of the content.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn targets_end(&self) -> bool {
        self.state.target >= self.state.max_scroll as f32 - SETTLE_EPSILON
    }

    /// Set the scrollable range. Position and target are clamped into the
    /// new range right away so a shrinking content never leaves the view
    /// past its end.
    pub fn set_max_scroll(&mut self, max_scroll: u32) {
        if self.state.max_scroll == max_scroll {
            return;
        }
        self.state.max_scroll = max_scroll;
        self.clamp();
    }

    pub fn scroll_by(&mut self, delta: f32) {
        if self.state.dragging {
            return;
        }
        self.state.target += delta;
        self.phase = ScrollPhase::Animating;
    }

    pub fn scroll_to(&mut self, position: f32) {
        if self.state.dragging {
            return;
        }
        self.state.target = position;
        self.phase = ScrollPhase::Animating;
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_to_end(&mut self) {
        self.scroll_to(self.state.max_scroll as f32);
    }

    /// Jump without animation (e.g. when the content is replaced).
    pub fn reset(&mut self) {
        self.state.position = 0.0;
        self.state.target = 0.0;
        self.state.velocity = 0.0;
        self.state.dragging = false;
        self.phase = ScrollPhase::Idle;
    }

    /// Start dragging the thumb. `thumb_top` is where the thumb currently
    /// sits; the cursor keeps the same distance to it during the drag.
    pub fn begin_drag(&mut self, cursor_y: f32, thumb_top: f32) {
        self.grab_offset = cursor_y - thumb_top;
        self.state.dragging = true;
        self.state.velocity = 0.0;
        self.phase = ScrollPhase::Dragging;
    }

    pub fn drag_to(&mut self, cursor_y: f32, track: DragTrack) {
        if !self.state.dragging {
            return;
        }
        let thumb_top = cursor_y - self.grab_offset;
        self.state.target = track.scroll_for_thumb_top(thumb_top, self.state.max_scroll);
    }

    pub fn end_drag(&mut self) {
        if !self.state.dragging {
            return;
        }
        self.state.dragging = false;
        self.phase = if (self.state.target - self.state.position).abs() < SETTLE_EPSILON {
            ScrollPhase::Idle
        } else {
            ScrollPhase::Animating
        };
    }

    /// Advance one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.clamp_target();

        if self.state.dragging {
            // The content follows the thumb directly while it is held.
            self.state.position = self.state.target;
            self.state.velocity = 0.0;
        } else {
            let diff = self.state.target - self.state.position;
            if diff.abs() > SETTLE_EPSILON {
                self.state.velocity = diff * (dt * FOLLOW_RATE).min(1.0);
                self.state.position += self.state.velocity;
            } else {
                self.state.position = self.state.target;
                self.state.velocity = 0.0;
            }

            if self.state.velocity.abs() > INERTIA_THRESHOLD {
                self.state.position += self.state.velocity * dt * FOLLOW_RATE;
                self.state.velocity *= INERTIA_DAMPING;
            }

            // Ease plus inertia never carries the position past the target.
            if (self.state.target - self.state.position) * diff < 0.0 {
                self.state.position = self.state.target;
                self.state.velocity = 0.0;
            }
        }

        self.clamp();
        self.phase = if self.state.dragging {
            ScrollPhase::Dragging
        } else if (self.state.target - self.state.position).abs() < SETTLE_EPSILON
            && self.state.velocity.abs() <= INERTIA_THRESHOLD
        {
            ScrollPhase::Idle
        } else {
            ScrollPhase::Animating
        };
    }

    #[allow(clippy::cast_precision_loss)]
    fn clamp_target(&mut self) {
        let max = self.state.max_scroll as f32;
        self.state.target = self.state.target.clamp(0.0, max);
    }

    #[allow(clippy::cast_precision_loss)]
    fn clamp(&mut self) {
        let max = self.state.max_scroll as f32;
        self.state.position = self.state.position.clamp(0.0, max);
        self.state.target = self.state.target.clamp(0.0, max);
    }
}
