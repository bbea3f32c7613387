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

//! Responsive viewport plumbing shared by every screen: design-space
//! scaling, inertial scrolling, list virtualization and the scrollbar.

pub mod cache;
pub mod scale;
pub mod scroll;
pub mod scrollbar;
pub mod virtual_list;

pub use cache::LruCache;
pub use scale::{Axis, ScaleEngine, ScaleState};
pub use scroll::{DragTrack, ScrollController, ScrollPhase, ScrollState};
pub use scrollbar::{Scrollbar, ScrollbarHit, ThumbGeometry};
pub use virtual_list::{VisibleItem, VisibleWindow, visible_window};
