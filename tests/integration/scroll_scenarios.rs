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

use aprende::app::{Author, MessageStore};
use aprende::view::scrollbar::{self, ScrollbarHit, thumb_geometry};
use aprende::view::{ScaleEngine, ScrollController, ScrollPhase, visible_window};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::Rect;

fn run(scroll: &mut ScrollController, frames: usize) {
    for _ in 0..frames {
        scroll.update(0.016);
    }
}

#[test]
fn shrinking_range_clamps_immediately() {
    let mut scroll = ScrollController::new();
    scroll.set_max_scroll(1000);
    scroll.scroll_to(1000.0);
    run(&mut scroll, 300);
    assert_eq!(scroll.offset(), 1000);

    scroll.set_max_scroll(200);
    assert!(scroll.position() <= 200.0);
    assert!(scroll.target() <= 200.0);
    run(&mut scroll, 1);
    assert_eq!(scroll.offset(), 200);
}

#[test]
fn content_that_fits_has_no_thumb() {
    let track = Rect::new(79, 0, 1, 20);
    assert_eq!(thumb_geometry(track, 20, 20, 0.0), None);
    assert_eq!(thumb_geometry(track, 5, 20, 0.0), None);
    assert!(thumb_geometry(track, 21, 20, 0.0).is_some());
    assert_eq!(scrollbar::hit_test(track, None, 0, 79, 3), ScrollbarHit::Outside);
}

#[test]
fn random_inputs_never_leave_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scroll = ScrollController::new();
    for _ in 0..2_000 {
        match rng.gen_range(0..5) {
            0 => scroll.set_max_scroll(rng.gen_range(0..500)),
            1 => scroll.scroll_by(rng.gen_range(-120.0..120.0)),
            2 => scroll.scroll_to(rng.gen_range(-50.0..600.0)),
            3 => scroll.scroll_to_end(),
            _ => scroll.update(rng.gen_range(0.0..0.1)),
        }
        scroll.update(0.016);
        #[allow(clippy::cast_precision_loss)]
        let max = scroll.max_scroll() as f32;
        assert!(scroll.position() >= 0.0 && scroll.position() <= max);
        assert!(scroll.target() >= 0.0 && scroll.target() <= max);
        assert!(scroll.offset() <= scroll.max_scroll());
    }
}

#[test]
fn drag_moves_through_phases() {
    let track = Rect::new(79, 2, 1, 20);
    let mut scroll = ScrollController::new();
    scroll.set_max_scroll(180);
    assert_eq!(scroll.phase(), ScrollPhase::Idle);

    let thumb = thumb_geometry(track, 200, 20, scroll.position()).expect("thumb");
    assert_eq!(thumb.top, 2);
    let ScrollbarHit::Thumb { thumb_top } =
        scrollbar::hit_test(track, Some(thumb), 180, 79, thumb.top)
    else {
        panic!("press on the thumb");
    };
    scroll.begin_drag(f32::from(thumb.top), thumb_top);
    assert_eq!(scroll.phase(), ScrollPhase::Dragging);

    // Wheel input does nothing while the thumb is held.
    scroll.scroll_by(50.0);
    assert_eq!(scroll.target(), 0.0);

    let bottom = f32::from(track.bottom());
    scroll.drag_to(bottom, scrollbar::drag_track(track, thumb));
    scroll.update(0.016);
    assert_eq!(scroll.offset(), 180);
    assert_eq!(scroll.phase(), ScrollPhase::Dragging);

    scroll.end_drag();
    assert_eq!(scroll.phase(), ScrollPhase::Idle);
    scroll.scroll_by(-40.0);
    assert_eq!(scroll.phase(), ScrollPhase::Animating);
    run(&mut scroll, 300);
    assert_eq!(scroll.phase(), ScrollPhase::Idle);
    assert_eq!(scroll.offset(), 140);
}

#[test]
fn scale_update_is_idempotent_and_monotonic() {
    let mut scale = ScaleEngine::new(100, 30);
    assert!(scale.update(200, 60));
    let generation = scale.generation();
    let wide = scale.cells_x(70.0);
    assert!(!scale.update(200, 60));
    assert_eq!(scale.generation(), generation);
    assert_eq!(scale.cells_x(70.0), wide);

    let mut last = 0;
    for width in [40, 80, 100, 160, 240, 400] {
        scale.update(width, 30);
        let cells = scale.cells_x(70.0);
        assert!(cells >= last, "{cells} < {last} at width {width}");
        last = cells;
    }

    scale.update(0, -5);
    assert_eq!(scale.state().current_width, 1);
    assert_eq!(scale.state().current_height, 1);
}

#[test]
fn sweeping_the_history_shows_every_entry_once() {
    let mut store = MessageStore::new();
    for i in 0..60 {
        let author = if i % 2 == 0 { Author::User } else { Author::Bot };
        store.append(author, "x ".repeat(i % 7 + 1));
    }
    let height_of = |text: &str| 2 + u32::try_from(text.len() / 6).unwrap_or(0) + 1;
    let heights: Vec<u32> = store.iter().map(|e| height_of(&e.text)).collect();
    let viewport = 12;
    let total: u64 = heights.iter().map(|&h| u64::from(h)).sum();
    let max = u32::try_from(total).expect("small total") - viewport;

    let mut seen = vec![false; heights.len()];
    let mut position = 0;
    while position <= max {
        let window = store.visible_window(position, viewport, |e| height_of(&e.text));
        assert_eq!(window, visible_window(&heights, position, viewport));
        let shown: u32 = window.items.iter().map(|item| item.visible_rows).sum();
        assert_eq!(shown, viewport);
        for item in &window.items {
            seen[item.index] = true;
        }
        position += viewport;
    }
    let window = store.visible_window(max, viewport, |e| height_of(&e.text));
    for item in &window.items {
        seen[item.index] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
